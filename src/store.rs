//! The task collection store.
//!
//! `TaskStore` exclusively owns the in-memory task collection. Every
//! mutation rewrites the persisted blob wholesale; construction hydrates
//! from the blob, falling back to the bundled seed dataset when the blob
//! is absent or unparsable. There is a single writer (this process), so
//! no locking discipline is needed.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::{Priority, Task};

const SEED_JSON: &str = include_str!("../data/seed.json");

/// In-memory owner of the task collection and its persistence boundary
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Hydrate a store from the persisted blob.
    ///
    /// An absent or unparsable blob is treated as first run: the seed
    /// dataset is loaded instead and no error surfaces.
    pub fn open(storage: Storage) -> Self {
        let tasks = if storage.blob_exists() {
            match storage.read_blob::<Vec<Task>>() {
                Ok(tasks) => {
                    debug!(count = tasks.len(), path = %storage.blob_path().display(), "hydrated task blob");
                    tasks
                }
                Err(err) => {
                    warn!(%err, path = %storage.blob_path().display(), "task blob unreadable, using seed dataset");
                    seed_tasks()
                }
            }
        } else {
            debug!(path = %storage.blob_path().display(), "no task blob, using seed dataset");
            seed_tasks()
        };
        Self { storage, tasks }
    }

    /// Construct a store around an existing collection without touching disk.
    /// Used by tests; `open` is the normal entry point.
    pub fn with_tasks(storage: Storage, tasks: Vec<Task>) -> Self {
        Self { storage, tasks }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current tasks in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task by id
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Next free id: `max(existing) + 1`, starting at 1
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
    }

    /// Append a task. Fails if the id is already present, guarding against
    /// duplicate submission.
    pub fn add(&mut self, task: Task) -> Result<()> {
        if self.get(task.id).is_some() {
            return Err(Error::DuplicateTask(task.id));
        }
        self.tasks.push(task);
        self.persist()
    }

    /// Replace the task whose id matches. Returns `false` (no-op) when the
    /// id is unknown; ids are derived internally, so this is not an error.
    pub fn edit(&mut self, task: Task) -> Result<bool> {
        let Some(slot) = self.tasks.iter_mut().find(|entry| entry.id == task.id) else {
            return Ok(false);
        };
        *slot = task;
        self.persist()?;
        Ok(true)
    }

    /// Remove the task with the matching id. Idempotent: an unknown id is
    /// a no-op returning `false`.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Update only the priority of a task, leaving every other field as-is
    pub fn set_priority(&mut self, id: u64, priority: Priority) -> Result<bool> {
        let Some(task) = self.get(id) else {
            return Ok(false);
        };
        let mut updated = task.clone();
        updated.priority = priority;
        self.edit(updated)
    }

    /// Tasks whose name contains `query` as a case-insensitive substring.
    /// The query is matched raw, whitespace included; an empty query
    /// returns all tasks. Non-destructive: `list()` is unaffected.
    pub fn filter(&self, query: &str) -> Vec<&Task> {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| needle.is_empty() || task.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn persist(&self) -> Result<()> {
        self.storage.write_blob(&self.tasks)
    }
}

/// The bundled seed dataset, used only on first run or after a parse
/// failure of the blob. Seed records carry no priority/status; serde
/// defaults assign `Low`/`Pending`.
pub fn seed_tasks() -> Vec<Task> {
    serde_json::from_str(SEED_JSON).unwrap_or_default()
}
