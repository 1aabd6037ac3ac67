//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist architecture.
//!
//! This crate provides the [`TodoStore`]: the reactive state container that
//! owns the canonical in-memory task list and active category filter,
//! exposes derived read-only views, and delegates all mutations to the use
//! cases in `tasklist-core`.
//!
//! ## Core Components
//!
//! - **`TodoStore`**: Owns [`TodoState`] and runs the mutation flow
//!   (use case → repository → state replacement → view republish)
//! - **Views**: Equality-gated observable projections of state
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::TodoStore;
//!
//! let store = TodoStore::new(repository, clock);
//! store.load().await?;
//! store.add("Buy milk", "home").await?;
//! store.set_category(Some("home".to_string()));
//!
//! let visible = store.visible_tasks().borrow().clone();
//! ```

use std::sync::Arc;
use tasklist_core::environment::Clock;
use tasklist_core::task::{Task, TaskId};
use tasklist_core::usecase::{AddTask, DeleteTask, LoadTasks, ToggleTaskDone};
use tasklist_core::{TaskFactory, TaskRepository};
use tokio::sync::watch;

use crate::view::View;

/// Equality-gated observable views
pub mod view;

/// Error types for the store runtime
pub mod error {
    use tasklist_core::repository::RepositoryError;
    use thiserror::Error;

    /// Errors that can occur during store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The repository failed to load or persist the collection.
        ///
        /// The store keeps its last known good state when this happens;
        /// the caller decides whether to retry, fall back, or surface the
        /// failure to the user.
        #[error("repository operation failed: {0}")]
        Repository(#[from] RepositoryError),
    }
}

use error::StoreError;

/// State owned exclusively by the store
///
/// Replaced atomically on every mutation; readers never observe a
/// half-updated state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Ordered task collection, the single source of truth in memory
    pub tasks: Vec<Task>,
    /// Active category filter; `None` means "show all"
    pub selected_category: Option<String>,
}

/// The reactive state container for the task list
///
/// All mutations go through the use cases, which persist via the injected
/// repository before the store replaces its in-memory state. Derived views
/// recompute after every replacement and suppress emissions that are
/// structurally equivalent to the previous one, so subscribers never
/// re-render for a no-op change.
///
/// # Concurrency
///
/// The store serializes nothing: if two mutating calls are issued
/// back-to-back before the first's persistence completes, both read the
/// same repository snapshot and the second write silently clobbers the
/// first. This lost-update hazard is an accepted property of the design,
/// not a guarantee; hosts wanting stronger semantics must queue their
/// mutation calls. State *replacement* is still atomic per call.
///
/// # Failure handling
///
/// Mutations return `Err(StoreError)` when the repository fails; the store
/// keeps its last known good state in that case.
pub struct TodoStore {
    state: watch::Sender<TodoState>,
    load_tasks: LoadTasks,
    add_task: AddTask,
    toggle_task: ToggleTaskDone,
    delete_task: DeleteTask,
    tasks: View<Vec<Task>>,
    visible_tasks: View<Vec<Task>>,
    categories: View<Vec<String>>,
    selected_category: View<Option<String>>,
}

impl TodoStore {
    /// Creates a store over the given repository and clock
    ///
    /// The four use cases are built internally; the clock feeds both the
    /// task factory and completion timestamps.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock>) -> Self {
        let factory = TaskFactory::new(Arc::clone(&clock));
        let (state, _) = watch::channel(TodoState::default());

        Self {
            state,
            load_tasks: LoadTasks::new(Arc::clone(&repository)),
            add_task: AddTask::new(Arc::clone(&repository), factory),
            toggle_task: ToggleTaskDone::new(Arc::clone(&repository), clock),
            delete_task: DeleteTask::new(repository),
            tasks: View::new(Vec::new(), same_rendering),
            visible_tasks: View::new(Vec::new(), same_rendering),
            categories: View::new(Vec::new(), |a, b| a == b),
            selected_category: View::new(None, |a, b| a == b),
        }
    }

    /// Returns a snapshot of the current state
    #[must_use]
    pub fn state(&self) -> TodoState {
        self.state.borrow().clone()
    }

    /// Observe the unfiltered task collection
    ///
    /// Emissions are suppressed when the id+status sequence is unchanged.
    #[must_use]
    pub fn tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    /// Observe the tasks visible under the active category filter
    ///
    /// All tasks when no filter is set. Emissions are suppressed when the
    /// filtered result is structurally equivalent (same length, same ids,
    /// same statuses, same order) to the previous one.
    #[must_use]
    pub fn visible_tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.visible_tasks.subscribe()
    }

    /// Observe the distinct category values across all tasks
    ///
    /// Sorted lexicographically ascending and deduplicated.
    #[must_use]
    pub fn categories(&self) -> watch::Receiver<Vec<String>> {
        self.categories.subscribe()
    }

    /// Observe the active category filter
    #[must_use]
    pub fn selected_category(&self) -> watch::Receiver<Option<String>> {
        self.selected_category.subscribe()
    }

    /// Populate the store from the repository
    ///
    /// # Errors
    ///
    /// [`StoreError::Repository`] when the load fails; state is unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<(), StoreError> {
        let tasks = self.load_tasks.execute().await?;
        tracing::debug!(count = tasks.len(), "tasks loaded");
        metrics::counter!("store.mutations", "operation" => "load").increment(1);
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Add a new task
    ///
    /// # Errors
    ///
    /// [`StoreError::Repository`] when persistence fails; state is
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, title: &str, category: &str) -> Result<(), StoreError> {
        let tasks = self.add_task.execute(title, category).await?;
        metrics::counter!("store.mutations", "operation" => "add").increment(1);
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Flip a task between pending and done
    ///
    /// An unknown id is a benign no-op.
    ///
    /// # Errors
    ///
    /// [`StoreError::Repository`] when persistence fails; state is
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_done(&self, id: &TaskId) -> Result<(), StoreError> {
        let tasks = self.toggle_task.execute(id).await?;
        metrics::counter!("store.mutations", "operation" => "toggle").increment(1);
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Remove a task
    ///
    /// An unknown id is a benign no-op.
    ///
    /// # Errors
    ///
    /// [`StoreError::Repository`] when persistence fails; state is
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: &TaskId) -> Result<(), StoreError> {
        let tasks = self.delete_task.execute(id).await?;
        metrics::counter!("store.mutations", "operation" => "remove").increment(1);
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Replace the active category filter
    ///
    /// Synchronous; touches only `selected_category`.
    pub fn set_category(&self, category: Option<String>) {
        self.state
            .send_modify(|state| state.selected_category = category);
        self.republish();
    }

    fn replace_tasks(&self, tasks: Vec<Task>) {
        self.state.send_modify(|state| state.tasks = tasks);
        self.republish();
    }

    /// Recompute every derived view from the current state.
    ///
    /// Each view applies its own equality gate, so a republish that leaves
    /// a projection structurally unchanged emits nothing for it.
    fn republish(&self) {
        let state = self.state.borrow().clone();
        self.visible_tasks.publish(visible(&state));
        self.categories.publish(distinct_categories(&state.tasks));
        self.selected_category
            .publish(state.selected_category.clone());
        self.tasks.publish(state.tasks);
    }
}

/// Structural equivalence for rendered task lists: same length, same ids,
/// same statuses, same order.
#[allow(clippy::ptr_arg)] // comparator signature is fn(&T, &T) with T = Vec<Task>
fn same_rendering(a: &Vec<Task>, b: &Vec<Task>) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.id == y.id && x.status == y.status)
}

fn visible(state: &TodoState) -> Vec<Task> {
    match &state.selected_category {
        None => state.tasks.clone(),
        Some(category) => state
            .tasks
            .iter()
            .filter(|task| &task.category == category)
            .cloned()
            .collect(),
    }
}

fn distinct_categories(tasks: &[Task]) -> Vec<String> {
    let mut categories: Vec<String> = tasks.iter().map(|task| task.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;
    use chrono::Utc;
    use tasklist_core::task::TaskStatus;

    fn task(title: &str, category: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(),
            title: title.to_string(),
            category: category.to_string(),
            status,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn distinct_categories_sorted_and_deduplicated() {
        let tasks = vec![
            task("A", "work", TaskStatus::Pending),
            task("B", "home", TaskStatus::Pending),
            task("C", "work", TaskStatus::Done),
        ];

        assert_eq!(distinct_categories(&tasks), vec!["home", "work"]);
    }

    #[test]
    fn same_rendering_ignores_titles() {
        let a = vec![task("A", "work", TaskStatus::Pending)];
        let mut b = a.clone();
        b[0].title = "renamed".to_string();

        assert!(same_rendering(&a, &b));
    }

    #[test]
    fn same_rendering_detects_status_change() {
        let a = vec![task("A", "work", TaskStatus::Pending)];
        let mut b = a.clone();
        b[0].status = TaskStatus::Done;

        assert!(!same_rendering(&a, &b));
    }

    #[test]
    fn same_rendering_detects_reorder() {
        let a = vec![
            task("A", "work", TaskStatus::Pending),
            task("B", "home", TaskStatus::Pending),
        ];
        let b = vec![a[1].clone(), a[0].clone()];

        assert!(!same_rendering(&a, &b));
    }

    #[test]
    fn visible_filters_by_selected_category() {
        let state = TodoState {
            tasks: vec![
                task("A", "work", TaskStatus::Pending),
                task("B", "home", TaskStatus::Pending),
            ],
            selected_category: Some("work".to_string()),
        };

        let visible = visible(&state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, "work");
    }

    #[test]
    fn visible_passes_all_tasks_without_filter() {
        let state = TodoState {
            tasks: vec![
                task("A", "work", TaskStatus::Pending),
                task("B", "home", TaskStatus::Pending),
            ],
            selected_category: None,
        };

        assert_eq!(visible(&state).len(), 2);
    }
}
