use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;

use super::buffer::TextBuffer;
use super::clock::Clock;
use super::constants::*;
use super::view::TodoApp;
use crate::capture::TaskInput;
use crate::config::AppConfig;
use crate::db::Database;
use crate::model::{ListView, Task};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Browse,
    Compose,
    Edit,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    database: Database,
    clock: Box<dyn Clock>,
    root: TodoApp,
    today: NaiveDate,
    view: ListView,
    tasks: Vec<Task>,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    input: TextBuffer,
    editing_task_id: Option<String>,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, database: Database, clock: Box<dyn Clock>) -> Result<Self> {
        let today = clock.today();
        let mut app = Self {
            config,
            database,
            clock,
            root: TodoApp::new(),
            today,
            view: ListView::default(),
            tasks: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Browse,
            input: TextBuffer::new(),
            editing_task_id: None,
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    pub(crate) fn refresh(&mut self) -> Result<()> {
        self.tasks = self.database.fetch_tasks(self.view)?;
        if self.tasks.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            if self.selected >= self.tasks.len() {
                self.selected = self.tasks.len() - 1;
            }
            self.list_state.select(Some(self.selected));
        }
        Ok(())
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        let today = self.clock.today();
        if today != self.today {
            tracing::debug!(%today, "date rolled over");
            self.today = today;
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.tasks.len() - 1);
        self.list_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = 0;
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = self.tasks.len() - 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn select_task_by_id(&mut self, id: &str) {
        if let Some(idx) = self.tasks.iter().position(|task| task.id == id) {
            self.selected = idx;
            self.list_state.select(Some(idx));
        }
    }

    fn switch_view(&mut self, view: ListView) -> Result<()> {
        self.view = view;
        self.selected = 0;
        tracing::debug!(view = view.label(), "switched view");
        self.refresh()
    }

    fn next_view(&mut self) -> Result<()> {
        self.switch_view(self.view.next())
    }

    fn prev_view(&mut self) -> Result<()> {
        self.switch_view(self.view.prev())
    }

    fn start_compose(&mut self) {
        self.input_mode = InputMode::Compose;
        self.editing_task_id = None;
    }

    fn leave_form(&mut self) {
        self.input.clear();
        self.editing_task_id = None;
        self.input_mode = InputMode::Browse;
    }

    fn add_task(&mut self) -> Result<()> {
        if self.input.is_blank() {
            self.set_status_error(STATUS_EMPTY_TASK);
            return Ok(());
        }

        let outcome = self
            .database
            .handle_add(&TaskInput::from_text(self.input.as_str()))?;
        self.input.clear();
        self.refresh()?;
        self.select_task_by_id(&outcome.id);
        self.set_status_info(format!("Added '{}'", outcome.title));
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to toggle");
            return Ok(());
        };
        let id = task.id.clone();
        let now_done = !task.is_done();

        let results = self.database.toggle_done(&[id.clone()])?;
        if !results.iter().any(|r| r.changed) {
            self.set_status_error("Task not found");
            self.refresh()?;
            return Ok(());
        }
        self.refresh()?;
        self.select_task_by_id(&id);
        if now_done {
            self.set_status_info("Marked task as done");
        } else {
            self.set_status_info("Marked task as active");
        }
        Ok(())
    }

    fn start_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to edit");
            return;
        };
        let (id, title) = (task.id.clone(), task.title.clone());
        self.input.set(title);
        self.editing_task_id = Some(id);
        self.input_mode = InputMode::Edit;
    }

    fn apply_edit(&mut self) -> Result<()> {
        let Some(id) = self.editing_task_id.clone() else {
            self.set_status_error("No task selected for editing");
            self.leave_form();
            return Ok(());
        };
        if self.input.is_blank() {
            self.set_status_error(STATUS_EMPTY_EDIT);
            return Ok(());
        }

        match self.database.rename_task(&id, self.input.as_str())? {
            Some(task) => {
                self.leave_form();
                self.refresh()?;
                self.select_task_by_id(&id);
                self.set_status_info(format!("Updated '{}'", task.title));
            }
            None => {
                self.leave_form();
                self.refresh()?;
                self.set_status_error("Task not found");
            }
        }
        Ok(())
    }

    fn cancel_edit(&mut self) {
        self.leave_form();
        self.status = None;
    }

    fn prompt_delete(&mut self) {
        if self.tasks.is_empty() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) -> Result<()> {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to delete");
            return Ok(());
        };
        let id = task.id.clone();
        let results = self.database.delete_tasks(&[id])?;
        if results.iter().any(|r| r.deleted) {
            self.set_status_info("Deleted task");
        } else {
            self.set_status_error("Task not found");
        }
        self.refresh()
    }

    fn clear_done(&mut self) -> Result<()> {
        let removed = self.database.clear_done()?;
        self.refresh()?;
        match removed {
            0 => self.set_status_info("No completed tasks to clear"),
            1 => self.set_status_info("Cleared 1 completed task"),
            n => self.set_status_info(format!("Cleared {} completed tasks", n)),
        }
        Ok(())
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message, StatusKind::Error));
    }
}
