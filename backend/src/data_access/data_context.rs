use redb::{backends::InMemoryBackend, Database, ReadableTable, TableDefinition};
use std::{path::Path, sync::Arc};
use taskboard_shared::task::Task;
use uuid::Uuid;

use super::{store_error::StoreError, task_repository::TaskRepository};

/// Keyed by the 16 raw UUID bytes; values are postcard-encoded `Task`s.
const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");

/// Thin handle to the redb file. Cloneable (Arc inside).
#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>
}

impl DataContext {
    /// Open (or create) the database at `path`. Creates tables if they don't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Throwaway database that lives only as long as this handle.
    pub fn in_memory() -> Result<Self, StoreError> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> Result<Self, StoreError> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(TASKS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(DataContext { db: Arc::new(db) })
    }
}

fn encode(task: &Task) -> Result<Vec<u8>, StoreError> {
    postcard::to_allocvec(task).map_err(|e| StoreError::Encode(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Task, StoreError> {
    postcard::from_bytes(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

impl TaskRepository for DataContext {
    fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            tasks.push(decode(value.value())?);
        }

        // Sort by created_at descending
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn get_task(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let task = tasks_table
            .get(id.as_bytes().as_slice())?
            .map(|data| decode(data.value()))
            .transpose()?;
        Ok(task)
    }

    fn create_task(&self, task: &Task) -> Result<(), StoreError> {
        let task_bytes = encode(task)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            tasks_table.insert(task.id.as_bytes().as_slice(), task_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn update_task(&self, id: Uuid, mutate: &dyn Fn(&mut Task)) -> Result<Option<Task>, StoreError> {
        let write_txn = self.db.begin_write()?;
        let updated;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = id.as_bytes();

            let existing = tasks_table
                .get(id_bytes.as_slice())?
                .map(|data| decode(data.value()))
                .transpose()?;
            let Some(mut task) = existing else {
                return Ok(None);
            };

            mutate(&mut task);
            tasks_table.insert(id_bytes.as_slice(), encode(&task)?.as_slice())?;
            updated = task;
        }
        write_txn.commit()?;
        Ok(Some(updated))
    }

    fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write()?;
        let deleted;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let result = tasks_table.remove(id.as_bytes().as_slice())?;
            deleted = result.is_some();
        }
        write_txn.commit()?;
        Ok(deleted)
    }

    fn update_tasks(&self, ids: &[Uuid], mutate: &dyn Fn(&mut Task)) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        let mut touched = 0;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            for id in ids {
                let id_bytes = id.as_bytes();
                let existing = tasks_table
                    .get(id_bytes.as_slice())?
                    .map(|data| decode(data.value()))
                    .transpose()?;
                if let Some(mut task) = existing {
                    mutate(&mut task);
                    tasks_table.insert(id_bytes.as_slice(), encode(&task)?.as_slice())?;
                    touched += 1;
                }
            }
        }
        write_txn.commit()?;
        Ok(touched)
    }

    fn delete_tasks(&self, ids: &[Uuid]) -> Result<usize, StoreError> {
        let write_txn = self.db.begin_write()?;
        let mut deleted = 0;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            for id in ids {
                if tasks_table.remove(id.as_bytes().as_slice())?.is_some() {
                    deleted += 1;
                }
            }
        }
        write_txn.commit()?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use taskboard_shared::{task::NewTask, task_priority::TaskPriority};

    fn new_task(title: &str) -> Task {
        Task::new(
            NewTask {
                title: title.into(),
                description: String::new(),
                due_date: None,
                priority: TaskPriority::Medium,
                tags: vec!["one".into(), "two".into()],
            },
            Utc::now(),
        )
    }

    #[test]
    fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.redb");

        let task = new_task("Persist me");
        {
            let ctx = DataContext::new(&path).unwrap();
            ctx.create_task(&task).unwrap();
        }

        // Reopen: data should be there, tags still a sequence
        let ctx = DataContext::new(&path).unwrap();
        let loaded = ctx.get_task(task.id).unwrap().unwrap();
        assert_eq!(loaded, task);
        assert_eq!(loaded.tags, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn list_is_newest_first() {
        let ctx = DataContext::in_memory().unwrap();
        let mut older = new_task("older");
        older.created_at = older.created_at - Duration::hours(1);
        let newer = new_task("newer");

        ctx.create_task(&older).unwrap();
        ctx.create_task(&newer).unwrap();

        let titles: Vec<_> = ctx.list_tasks().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[test]
    fn update_missing_task_returns_none() {
        let ctx = DataContext::in_memory().unwrap();
        let result = ctx.update_task(Uuid::new_v4(), &|t| t.completed = true).unwrap();
        assert!(result.is_none());
        assert!(ctx.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn update_persists_mutation() {
        let ctx = DataContext::in_memory().unwrap();
        let task = new_task("flip me");
        ctx.create_task(&task).unwrap();

        let returned = ctx.update_task(task.id, &|t| t.completed = true).unwrap().unwrap();
        assert!(returned.completed);
        assert!(ctx.get_task(task.id).unwrap().unwrap().completed);
    }

    #[test]
    fn delete_twice_reports_missing_second_time() {
        let ctx = DataContext::in_memory().unwrap();
        let task = new_task("Doomed");
        ctx.create_task(&task).unwrap();

        assert!(ctx.delete_task(task.id).unwrap());
        assert!(!ctx.delete_task(task.id).unwrap());
        assert!(ctx.get_task(task.id).unwrap().is_none());
    }

    #[test]
    fn bulk_operations_skip_unknown_ids() {
        let ctx = DataContext::in_memory().unwrap();
        let a = new_task("a");
        let b = new_task("b");
        ctx.create_task(&a).unwrap();
        ctx.create_task(&b).unwrap();

        let ids = [a.id, b.id, Uuid::new_v4()];
        assert_eq!(ctx.update_tasks(&ids, &|t| t.completed = true).unwrap(), 2);
        assert!(ctx.list_tasks().unwrap().iter().all(|t| t.completed));

        assert_eq!(ctx.delete_tasks(&ids).unwrap(), 2);
        assert!(ctx.list_tasks().unwrap().is_empty());
    }
}
