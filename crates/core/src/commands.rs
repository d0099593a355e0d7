use anyhow::Result;

use crate::config::AppConfig;
use crate::database::Database;
use crate::model::{DeleteResult, StatusUpdate};

/// Delete the tasks with the provided ids (full ids or unique suffixes) and return per-id results.
pub fn delete_tasks(config: &AppConfig, ids: &[String]) -> Result<Vec<DeleteResult>> {
    let database = Database::initialize(config)?;
    let resolved = resolve_all(&database, ids)?;
    database.delete_tasks(&resolved)
}

/// Mark the tasks with the provided ids as done and return per-id results.
pub fn complete_tasks(config: &AppConfig, ids: &[String]) -> Result<Vec<StatusUpdate>> {
    let database = Database::initialize(config)?;
    let resolved = resolve_all(&database, ids)?;
    database.mark_done(&resolved)
}

fn resolve_all(database: &Database, ids: &[String]) -> Result<Vec<String>> {
    ids.iter()
        .map(|id| Ok(database.resolve_id(id)?.unwrap_or_else(|| id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::TaskInput;
    use crate::model::{InsertableTask, ListView, NewTask, TaskStatus};
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    #[test]
    fn complete_tasks_resolves_suffixes() {
        let (config, _dir) = temp_config();
        let mut db = Database::initialize(&config).expect("db");
        let id = db.handle_add(&TaskInput::from_text("Ship it")).expect("add").id;
        drop(db);

        let suffix = id[id.len() - 6..].to_ascii_lowercase();
        let results = complete_tasks(&config, &[suffix, "nope".into()]).expect("complete");
        assert_eq!(results.len(), 2);
        assert!(results[0].changed);
        assert_eq!(results[0].id, id);
        assert!(!results[1].changed);
    }

    #[test]
    fn ambiguous_suffix_fails_the_whole_batch() {
        let (config, _dir) = temp_config();
        let db = Database::initialize(&config).expect("db");
        for (id, title) in [
            ("01HF2K3M4N5P6Q7R8S9TAAAAAA", "One"),
            ("01HF2K3M4N5P6Q7R8S9TBAAAAA", "Two"),
            ("01HF2K3M4N5P6Q7R8S9TCCCCCC", "Three"),
        ] {
            db.insert_task(&InsertableTask {
                id: id.into(),
                data: NewTask {
                    title: title.into(),
                    status: TaskStatus::Active,
                },
            })
            .expect("insert");
        }
        drop(db);

        let err = complete_tasks(&config, &["CCCCCC".into(), "AAAAA".into()]).unwrap_err();
        assert!(err.to_string().contains("is ambiguous"), "{err}");

        let db = Database::initialize(&config).expect("db");
        let done = db.fetch_tasks(ListView::Done).expect("fetch");
        assert!(done.is_empty());
    }
}
