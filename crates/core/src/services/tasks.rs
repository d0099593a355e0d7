use anyhow::Result;

use crate::capture::TaskInput;
use crate::config::AppConfig;
use crate::database::Database;
use crate::model::{AddOutcome, DeleteResult, ListView, StatusUpdate, Task};

#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub view: ListView,
    pub tasks: Vec<Task>,
}

impl ViewSnapshot {
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_done()).count()
    }
}

/// Opens the store per call so short-lived clients (CLI commands) never hold a connection.
#[derive(Debug, Clone)]
pub struct TasksService {
    config: AppConfig,
}

impl TasksService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Database::initialize(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn list(&self, view: ListView) -> Result<ViewSnapshot> {
        let db = self.open_database()?;
        Ok(ViewSnapshot {
            view,
            tasks: db.fetch_tasks(view)?,
        })
    }

    pub fn capture(&self, input: TaskInput) -> Result<AddOutcome> {
        let mut db = self.open_database()?;
        db.handle_add(&input)
    }

    pub fn toggle_done(&self, ids: &[String]) -> Result<Vec<StatusUpdate>> {
        let db = self.open_database()?;
        db.toggle_done(ids)
    }

    pub fn mark_done(&self, ids: &[String]) -> Result<Vec<StatusUpdate>> {
        let db = self.open_database()?;
        db.mark_done(ids)
    }

    pub fn rename_task(&self, id: &str, title: &str) -> Result<Option<Task>> {
        let db = self.open_database()?;
        db.rename_task(id, title)
    }

    pub fn delete(&self, ids: &[String]) -> Result<Vec<DeleteResult>> {
        let db = self.open_database()?;
        db.delete_tasks(ids)
    }

    pub fn clear_done(&self) -> Result<usize> {
        let db = self.open_database()?;
        db.clear_done()
    }

    pub fn fetch_task(&self, id: &str) -> Result<Option<Task>> {
        let db = self.open_database()?;
        db.fetch_task(id)
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}
