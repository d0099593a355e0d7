use thiserror::Error;

use crate::model::{AddOutcome, InsertableTask, NewTask, TaskStatus};

/// Normalized input for capturing a task from any client (CLI or TUI).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub text: Vec<String>,
}

impl TaskInput {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn require_text(&self) -> Result<(), CaptureError> {
        if self.title().is_empty() {
            return Err(CaptureError::EmptyText);
        }
        Ok(())
    }

    /// Words joined by single spaces, blanks dropped.
    pub fn title(&self) -> String {
        self.text
            .iter()
            .flat_map(|part| part.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn prepare(&self) -> Result<(InsertableTask, AddOutcome), CaptureError> {
        self.require_text()?;
        let title = self.title();
        let insertable = NewTask {
            title: title.clone(),
            status: TaskStatus::Active,
        }
        .into_insertable();
        let outcome = AddOutcome {
            id: insertable.id.clone(),
            title,
        };
        Ok((insertable, outcome))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Task text cannot be empty")]
    EmptyText,
}
