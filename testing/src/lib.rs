//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist architecture.
//!
//! This crate provides:
//! - Mock implementations of the core traits (`FakeTaskRepository`,
//!   `FixedClock`)
//! - Builders for test tasks
//!
//! ## Example
//!
//! ```
//! use tasklist_testing::{test_clock, FakeTaskRepository};
//! use tasklist_core::usecase::AddTask;
//! use tasklist_core::TaskFactory;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repo = Arc::new(FakeTaskRepository::new());
//! let factory = TaskFactory::new(Arc::new(test_clock()));
//! let add = AddTask::new(repo.clone(), factory);
//!
//! let tasks = add.execute("Buy milk", "home").await.unwrap();
//! assert_eq!(tasks.len(), 1);
//! # }
//! ```

/// Mock implementations for testing.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tasklist_core::environment::Clock;
    use tasklist_core::repository::{RepositoryError, RepositoryFuture, TaskRepository};
    use tasklist_core::task::Task;
    use tokio::sync::watch;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// In-memory task repository for fast, deterministic tests
    ///
    /// Keeps the collection in a `watch` channel exactly like a real
    /// backend, so observers and snapshot reads behave identically.
    /// Failures can be injected per operation to exercise error
    /// propagation paths.
    pub struct FakeTaskRepository {
        subject: watch::Sender<Vec<Task>>,
        fail_loads: AtomicBool,
        fail_saves: AtomicBool,
    }

    impl FakeTaskRepository {
        /// Create an empty fake repository
        #[must_use]
        pub fn new() -> Self {
            Self::with_tasks(Vec::new())
        }

        /// Create a fake repository seeded with `initial`
        #[must_use]
        pub fn with_tasks(initial: Vec<Task>) -> Self {
            let (subject, _) = watch::channel(initial);
            Self {
                subject,
                fail_loads: AtomicBool::new(false),
                fail_saves: AtomicBool::new(false),
            }
        }

        /// Make subsequent `load` calls fail
        pub fn fail_loads(&self, fail: bool) {
            self.fail_loads.store(fail, Ordering::SeqCst);
        }

        /// Make subsequent `save` calls fail
        pub fn fail_saves(&self, fail: bool) {
            self.fail_saves.store(fail, Ordering::SeqCst);
        }

        /// Returns the collection as last persisted
        #[must_use]
        pub fn persisted(&self) -> Vec<Task> {
            self.subject.borrow().clone()
        }
    }

    impl Default for FakeTaskRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TaskRepository for FakeTaskRepository {
        fn observe(&self) -> watch::Receiver<Vec<Task>> {
            self.subject.subscribe()
        }

        fn load(&self) -> RepositoryFuture<'_, Vec<Task>> {
            Box::pin(async move {
                if self.fail_loads.load(Ordering::SeqCst) {
                    return Err(RepositoryError::Storage("injected load failure".into()));
                }
                Ok(self.subject.borrow().clone())
            })
        }

        fn save(&self, tasks: Vec<Task>) -> RepositoryFuture<'_, ()> {
            Box::pin(async move {
                if self.fail_saves.load(Ordering::SeqCst) {
                    return Err(RepositoryError::Storage("injected save failure".into()));
                }
                self.subject.send_replace(tasks);
                Ok(())
            })
        }
    }
}

/// Builders for test tasks.
pub mod helpers {
    use tasklist_core::task::{Task, TaskId, TaskStatus};

    use crate::mocks::test_clock;
    use tasklist_core::environment::Clock;

    /// Build a pending task with a fresh id and the test-clock timestamp
    #[must_use]
    pub fn pending_task(title: &str, category: &str) -> Task {
        Task {
            id: TaskId::new(),
            title: title.to_string(),
            category: category.to_string(),
            status: TaskStatus::Pending,
            created_at: test_clock().now(),
            completed_at: None,
        }
    }

    /// Build a completed task with a fresh id and the test-clock timestamp
    #[must_use]
    pub fn done_task(title: &str, category: &str) -> Task {
        let now = test_clock().now();
        Task {
            completed_at: Some(now),
            status: TaskStatus::Done,
            ..pending_task(title, category)
        }
    }
}

// Re-export commonly used items
pub use helpers::{done_task, pending_task};
pub use mocks::{FakeTaskRepository, FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::environment::Clock;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
