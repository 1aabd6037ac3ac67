//! Use cases - the four business operations over the task collection.
//!
//! Each use case reads current state from the repository, computes a new
//! collection, persists it, and returns the result. Every invocation takes
//! exactly one snapshot of the repository's current value and never
//! re-reads mid-operation. Overlapping invocations can still both snapshot
//! the same state and the later write wins (lost-update hazard); see the
//! store documentation in `tasklist-runtime`.
//!
//! Repository failures are not caught here; they propagate to the caller
//! with `?`.

use crate::environment::Clock;
use crate::factory::TaskFactory;
use crate::repository::{RepositoryError, TaskRepository};
use crate::task::{Task, TaskId};
use std::sync::Arc;

/// One snapshot of the repository's current collection.
///
/// Uses the observable channel's latest value rather than `load()` so that
/// mutations read the in-memory state the repository already broadcast,
/// exactly once per use-case invocation.
fn snapshot(repository: &Arc<dyn TaskRepository>) -> Vec<Task> {
    repository.observe().borrow().clone()
}

/// Loads the persisted task collection
pub struct LoadTasks {
    repository: Arc<dyn TaskRepository>,
}

impl LoadTasks {
    /// Creates the use case with its injected repository
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Loads and returns the persisted collection
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the backend unchanged.
    pub async fn execute(&self) -> Result<Vec<Task>, RepositoryError> {
        self.repository.load().await
    }
}

/// Adds a new task to the front of the collection
pub struct AddTask {
    repository: Arc<dyn TaskRepository>,
    factory: TaskFactory,
}

impl AddTask {
    /// Creates the use case with its injected repository and factory
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, factory: TaskFactory) -> Self {
        Self {
            repository,
            factory,
        }
    }

    /// Prepends a freshly constructed task, persists, and returns the new
    /// collection
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the save unchanged.
    pub async fn execute(&self, title: &str, category: &str) -> Result<Vec<Task>, RepositoryError> {
        let current = snapshot(&self.repository);

        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(self.factory.create(title, category));
        next.extend(current);

        self.repository.save(next.clone()).await?;
        Ok(next)
    }
}

/// Flips a task between pending and done
pub struct ToggleTaskDone {
    repository: Arc<dyn TaskRepository>,
    clock: Arc<dyn Clock>,
}

impl ToggleTaskDone {
    /// Creates the use case with its injected repository and clock
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Toggles the task matching `id`, persists, and returns the updated
    /// collection
    ///
    /// The matching task flips status and gains or loses `completed_at`
    /// accordingly; all other tasks pass through unchanged. An unknown id
    /// is a benign no-op: the unchanged collection is persisted as-is.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the save unchanged.
    pub async fn execute(&self, id: &TaskId) -> Result<Vec<Task>, RepositoryError> {
        let now = self.clock.now();
        let next: Vec<Task> = snapshot(&self.repository)
            .into_iter()
            .map(|task| {
                if task.id == *id {
                    task.toggled(now)
                } else {
                    task
                }
            })
            .collect();

        self.repository.save(next.clone()).await?;
        Ok(next)
    }
}

/// Removes a task from the collection
pub struct DeleteTask {
    repository: Arc<dyn TaskRepository>,
}

impl DeleteTask {
    /// Creates the use case with its injected repository
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Removes the task matching `id` (no-op when absent), persists, and
    /// returns the remaining collection
    ///
    /// Relative order of the remaining tasks is preserved.
    ///
    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the save unchanged.
    pub async fn execute(&self, id: &TaskId) -> Result<Vec<Task>, RepositoryError> {
        let mut next = snapshot(&self.repository);
        next.retain(|task| task.id != *id);

        self.repository.save(next.clone()).await?;
        Ok(next)
    }
}
