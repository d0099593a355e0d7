use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{named_params, Connection, Row};

use crate::capture::TaskInput;
use crate::config::AppConfig;
use crate::model::{
    AddOutcome, DeleteResult, InsertableTask, ListView, StatusUpdate, Task, TaskStatus,
};


const TASK_COLUMNS: &str = "id, title, status, created_at, updated_at, completed_at";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let conn = Connection::open(config.db_path()).with_context(|| {
            format!("Failed to open database at {}", config.db_path().display())
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to configure SQLite WAL mode")?;

        let db = Self { conn };
        db.apply_migrations()?;
        tracing::debug!(path = %config.db_path().display(), "task store opened");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    pub fn handle_add(&mut self, input: &TaskInput) -> Result<AddOutcome> {
        let (insertable, outcome) = input.prepare()?;
        self.insert_task(&insertable)?;
        tracing::info!(task_id = outcome.id.as_str(), "task captured");
        Ok(outcome)
    }

    /// Active tasks come before done ones in the `All` view; otherwise creation order.
    pub fn fetch_tasks(&self, view: ListView) -> Result<Vec<Task>> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
        match view.to_status() {
            Some(_) => sql.push_str(" WHERE status = :status ORDER BY created_at ASC, rowid ASC"),
            None => sql.push_str(
                " ORDER BY CASE status WHEN 'done' THEN 1 ELSE 0 END ASC, created_at ASC, rowid ASC",
            ),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match view.to_status() {
            Some(status) => stmt.query(named_params![":status": status.as_str()])?,
            None => stmt.query([])?,
        };

        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(self.map_task(row)?);
        }
        Ok(tasks)
    }

    pub fn fetch_task(&self, id: &str) -> Result<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? LIMIT 1"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(self.map_task(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn mark_done(&self, ids: &[String]) -> Result<Vec<StatusUpdate>> {
        let now = Utc::now().to_rfc3339();
        self.update_status(ids, TaskStatus::Done, Some(now))
    }

    pub fn mark_active(&self, ids: &[String]) -> Result<Vec<StatusUpdate>> {
        self.update_status(ids, TaskStatus::Active, None)
    }

    /// Flip each task between active and done. Missing ids report `changed: false`.
    pub fn toggle_done(&self, ids: &[String]) -> Result<Vec<StatusUpdate>> {
        let mut results = Vec::new();
        for id in ids {
            let update = match self.fetch_task(id)? {
                Some(task) => match task.status.toggled() {
                    TaskStatus::Done => self.mark_done(std::slice::from_ref(id))?,
                    TaskStatus::Active => self.mark_active(std::slice::from_ref(id))?,
                },
                None => vec![StatusUpdate {
                    id: id.to_string(),
                    changed: false,
                }],
            };
            results.extend(update);
        }
        Ok(results)
    }

    fn update_status(
        &self,
        ids: &[String],
        status: TaskStatus,
        completed_at: Option<String>,
    ) -> Result<Vec<StatusUpdate>> {
        let mut results = Vec::new();
        let updated_ts = Utc::now().to_rfc3339();
        let completed_ref = completed_at.as_deref();
        for id in ids {
            let updated = self.conn.execute(
                "UPDATE tasks SET status = :status, completed_at = :completed, updated_at = :updated \
                 WHERE id = :id AND status != :status",
                named_params![
                    ":status": status.as_str(),
                    ":completed": completed_ref,
                    ":updated": updated_ts,
                    ":id": id,
                ],
            )?;
            if updated > 0 {
                tracing::info!(task_id = id.as_str(), status = status.as_str(), "task status changed");
            }
            results.push(StatusUpdate {
                id: id.to_string(),
                changed: updated > 0,
            });
        }
        Ok(results)
    }

    pub fn rename_task(&self, id: &str, title: &str) -> Result<Option<Task>> {
        let input = TaskInput::from_text(title);
        input.require_text()?;

        let updated = self.conn.execute(
            "UPDATE tasks SET title = :title, updated_at = :updated WHERE id = :id",
            named_params![
                ":title": input.title(),
                ":updated": Utc::now().to_rfc3339(),
                ":id": id,
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        tracing::info!(task_id = id, "task renamed");
        self.fetch_task(id)
    }

    pub fn delete_tasks(&self, ids: &[String]) -> Result<Vec<DeleteResult>> {
        let mut results = Vec::new();
        for id in ids {
            let affected = self
                .conn
                .execute("DELETE FROM tasks WHERE id = :id", named_params![":id": id])?;
            if affected > 0 {
                tracing::info!(task_id = id.as_str(), "task deleted");
            }
            results.push(DeleteResult {
                id: id.to_string(),
                deleted: affected > 0,
            });
        }
        Ok(results)
    }

    /// Remove every completed task, returning how many rows went away.
    pub fn clear_done(&self) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM tasks WHERE status = :status",
            named_params![":status": TaskStatus::Done.as_str()],
        )?;
        tracing::info!(removed, "cleared completed tasks");
        Ok(removed)
    }

    /// Resolve a full id from either the id itself or a unique suffix (the short ids shown to users).
    /// ULIDs are case-insensitive, so lowercase input matches too.
    pub fn resolve_id(&self, needle: &str) -> Result<Option<String>> {
        if let Some(task) = self.fetch_task(needle)? {
            return Ok(Some(task.id));
        }
        if needle.is_empty() {
            return Ok(None);
        }
        let needle = needle.to_ascii_uppercase();
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM tasks WHERE substr(id, -length(:needle)) = :needle LIMIT 2")?;
        let ids = stmt
            .query_map(named_params![":needle": needle.as_str()], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        match ids.as_slice() {
            [only] => Ok(Some(only.clone())),
            [] => Ok(None),
            _ => Err(anyhow!("Task id '{}' is ambiguous", needle)),
        }
    }

    pub(crate) fn insert_task(&self, insertable: &InsertableTask) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO tasks (id, title, status, created_at, updated_at, completed_at) \
                 VALUES (:id, :title, :status, :created, :updated, NULL)",
                named_params![
                    ":id": insertable.id,
                    ":title": insertable.data.title,
                    ":status": insertable.data.status.as_str(),
                    ":created": now,
                    ":updated": now,
                ],
            )
            .context("Failed to insert task")?;
        Ok(())
    }

    fn map_task(&self, row: &Row<'_>) -> Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            title: row.get(1)?,
            status: row.get::<_, String>(2)?.parse()?,
            created_at: parse_datetime_required(row.get::<_, String>(3)?)?,
            updated_at: parse_datetime_required(row.get::<_, String>(4)?)?,
            completed_at: parse_datetime(row.get::<_, Option<String>>(5)?),
        })
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    status TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    completed_at TEXT
                 );
                 CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
                ",
            )
            .context("Failed to apply task store migrations")?;
        Ok(())
    }
}

fn parse_datetime(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_datetime_required(raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn add(db: &mut Database, text: &str) -> String {
        db.handle_add(&TaskInput::from_text(text)).expect("add task").id
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn handle_add_and_fetch_roundtrip() {
        let (config, _dir) = temp_config();
        let mut db = Database::initialize(&config).expect("initialize db");

        let id = add(&mut db, "  Renew   passport ");
        let task = db.fetch_task(&id).expect("fetch").expect("task exists");

        assert_eq!(task.title, "Renew passport");
        assert_eq!(task.status, TaskStatus::Active);
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn handle_add_rejects_blank_text() {
        let mut db = Database::open_in_memory().expect("db");
        let err = db.handle_add(&TaskInput::from_text("   ")).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
        assert!(db.fetch_tasks(ListView::All).expect("fetch").is_empty());
    }

    #[test]
    fn all_view_lists_active_before_done() {
        let mut db = Database::open_in_memory().expect("db");
        let first = add(&mut db, "First");
        add(&mut db, "Second");
        add(&mut db, "Third");
        db.mark_done(&[first]).expect("mark done");

        let all = db.fetch_tasks(ListView::All).expect("all");
        assert_eq!(titles(&all), vec!["Second", "Third", "First"]);

        let active = db.fetch_tasks(ListView::Active).expect("active");
        assert_eq!(titles(&active), vec!["Second", "Third"]);

        let done = db.fetch_tasks(ListView::Done).expect("done");
        assert_eq!(titles(&done), vec!["First"]);
    }

    #[test]
    fn mark_done_sets_completion_and_reports_noop() {
        let mut db = Database::open_in_memory().expect("db");
        let id = add(&mut db, "Write report");

        let first = db.mark_done(&[id.clone()]).expect("mark done");
        assert!(first[0].changed);
        let task = db.fetch_task(&id).expect("fetch").expect("task");
        assert!(task.completed_at.is_some());

        let second = db.mark_done(&[id.clone()]).expect("mark done again");
        assert!(!second[0].changed);

        db.mark_active(&[id.clone()]).expect("reactivate");
        let task = db.fetch_task(&id).expect("fetch").expect("task");
        assert_eq!(task.status, TaskStatus::Active);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn toggle_done_flips_status_and_skips_missing() {
        let mut db = Database::open_in_memory().expect("db");
        let id = add(&mut db, "Stretch");

        let results = db
            .toggle_done(&[id.clone(), "missing".into()])
            .expect("toggle");
        assert!(results[0].changed);
        assert!(!results[1].changed);
        assert!(db.fetch_task(&id).expect("fetch").expect("task").is_done());

        db.toggle_done(&[id.clone()]).expect("toggle back");
        assert!(!db.fetch_task(&id).expect("fetch").expect("task").is_done());
    }

    #[test]
    fn rename_task_updates_title() {
        let mut db = Database::open_in_memory().expect("db");
        let id = add(&mut db, "Draft");

        let renamed = db
            .rename_task(&id, " Final   draft ")
            .expect("rename")
            .expect("task");
        assert_eq!(renamed.title, "Final draft");
        assert!(db.rename_task("missing", "Anything").expect("rename").is_none());
        assert!(db.rename_task(&id, "  ").is_err());
    }

    #[test]
    fn delete_and_clear_done_affect_storage() {
        let mut db = Database::open_in_memory().expect("db");
        let keep = add(&mut db, "Keep");
        let discard = add(&mut db, "Discard");
        let finished = add(&mut db, "Finished");
        db.mark_done(&[finished]).expect("mark done");

        let deleted = db
            .delete_tasks(&[discard, "missing".into()])
            .expect("delete");
        assert!(deleted[0].deleted);
        assert!(!deleted[1].deleted);

        assert_eq!(db.clear_done().expect("clear"), 1);
        let remaining = db.fetch_tasks(ListView::All).expect("fetch");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep);
    }

    #[test]
    fn resolve_id_accepts_unique_suffixes() {
        let mut db = Database::open_in_memory().expect("db");
        let id = add(&mut db, "Find me");
        add(&mut db, "Someone else");

        assert_eq!(db.resolve_id(&id).expect("full"), Some(id.clone()));
        let suffix = &id[id.len() - 6..];
        assert_eq!(db.resolve_id(suffix).expect("suffix"), Some(id.clone()));
        assert_eq!(db.resolve_id("not-an-id").expect("missing"), None);
        assert_eq!(db.resolve_id("").expect("empty"), None);
    }

    fn insert_with_id(db: &Database, id: &str, title: &str) {
        db.insert_task(&InsertableTask {
            id: id.to_string(),
            data: NewTask {
                title: title.into(),
                status: TaskStatus::Active,
            },
        })
        .expect("insert");
    }

    #[test]
    fn resolve_id_ignores_case() {
        let db = Database::open_in_memory().expect("db");
        insert_with_id(&db, "01HF2K3M4N5P6Q7R8S9TVWXYZ0", "Shouting id");

        assert_eq!(
            db.resolve_id("vwxyz0").expect("lowercase"),
            Some("01HF2K3M4N5P6Q7R8S9TVWXYZ0".to_string())
        );
    }

    #[test]
    fn resolve_id_rejects_ambiguous_suffixes() {
        let db = Database::open_in_memory().expect("db");
        insert_with_id(&db, "01HF2K3M4N5P6Q7R8S9TAAAAAA", "One");
        insert_with_id(&db, "01HF2K3M4N5P6Q7R8S9TBAAAAA", "Two");

        let err = db.resolve_id("AAAAA").unwrap_err();
        assert!(err.to_string().contains("is ambiguous"), "{err}");
        assert_eq!(
            db.resolve_id("BAAAAA").expect("unique"),
            Some("01HF2K3M4N5P6Q7R8S9TBAAAAA".to_string())
        );
    }

    #[test]
    fn migrations_are_idempotent() {
        let (config, _dir) = temp_config();
        let mut db = Database::initialize(&config).expect("first open");
        add(&mut db, "Persisted");
        drop(db);

        let db = Database::initialize(&config).expect("second open");
        assert_eq!(db.fetch_tasks(ListView::All).expect("fetch").len(), 1);

        let mut stmt = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .expect("prepare");
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .expect("query")
            .collect::<rusqlite::Result<Vec<_>>>()
            .expect("tables");
        assert_eq!(tables, vec!["tasks".to_string()]);
    }
}
