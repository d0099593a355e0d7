use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use ulid::Ulid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Active => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Active,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "done" => Ok(TaskStatus::Done),
            other => Err(anyhow!("Unknown status '{}': expected active|done", other)),
        }
    }
}

/// Which slice of the task collection a list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum ListView {
    #[default]
    All,
    Active,
    Done,
}

impl ListView {
    pub const ALL: [ListView; 3] = [ListView::All, ListView::Active, ListView::Done];

    pub fn to_status(&self) -> Option<TaskStatus> {
        match self {
            ListView::All => None,
            ListView::Active => Some(TaskStatus::Active),
            ListView::Done => Some(TaskStatus::Done),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListView::All => "All",
            ListView::Active => "Active",
            ListView::Done => "Done",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ListView::All => ListView::Active,
            ListView::Active => ListView::Done,
            ListView::Done => ListView::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ListView::All => ListView::Done,
            ListView::Active => ListView::All,
            ListView::Done => ListView::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn into_insertable(self) -> InsertableTask {
        InsertableTask {
            id: Ulid::new().to_string(),
            data: self,
        }
    }
}

#[derive(Debug)]
pub struct InsertableTask {
    pub id: String,
    pub data: NewTask,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddOutcome {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub id: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub id: String,
    pub deleted: bool,
}
