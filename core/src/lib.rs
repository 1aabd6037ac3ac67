//! # Tasklist Core
//!
//! Core domain types and traits for the tasklist architecture.
//!
//! This crate provides the fundamental abstractions of a client-side
//! task-list application: the task entity and its construction rules, the
//! repository contract a persistence backend must satisfy, and the use
//! cases that mutate the task collection through that contract.
//!
//! ## Core Concepts
//!
//! - **Task**: The domain entity (title, category, completion status,
//!   timestamps)
//! - **Factory**: The single place where new tasks are constructed and
//!   input is normalized
//! - **Repository**: Durable storage of the full task collection behind
//!   load/save/observe operations
//! - **Use Case**: One named business operation composed from repository
//!   reads and writes
//! - **Environment**: Injected dependencies via traits (Clock)
//!
//! ## Architecture Principles
//!
//! - Dependency injection via explicit constructor parameters
//! - Whole-collection replacement on every save (no partial writes)
//! - Explicit `Result` propagation for repository failures
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_core::{AddTask, TaskFactory};
//! use tasklist_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let factory = TaskFactory::new(Arc::new(SystemClock));
//! let add = AddTask::new(repository, factory);
//! let tasks = add.execute("Buy milk", "home").await?;
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Task construction rules (trimming, category defaulting)
pub mod factory;

/// Feature-flag injection surface
pub mod flags;

/// Task repository trait and error types
pub mod repository;

/// The task entity and its identifier
pub mod task;

/// Use cases - the four business operations over the task collection
pub mod usecase;

/// Environment module - dependency injection traits
///
/// All external dependencies of the domain layer are abstracted behind
/// traits and injected via constructor parameters.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklist_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

// Re-export commonly used items
pub use factory::TaskFactory;
pub use repository::{RepositoryError, TaskRepository};
pub use task::{Task, TaskId, TaskStatus};
pub use usecase::{AddTask, DeleteTask, LoadTasks, ToggleTaskDone};
