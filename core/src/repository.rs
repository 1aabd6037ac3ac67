//! Task repository trait and related types.
//!
//! This module defines the core abstraction for durable task storage. The
//! repository owns the persisted collection and only ever replaces it
//! wholesale; there are no partial or merge semantics.
//!
//! # Design
//!
//! The `TaskRepository` trait is deliberately minimal:
//!
//! - Observe the current collection (latest value replayed to new
//!   subscribers)
//! - Load the persisted collection
//! - Save a full replacement collection
//!
//! `load` and `save` are not atomic across concurrent callers; the system
//! relies on cooperative single-writer usage from the store.
//!
//! # Implementations
//!
//! - `JsonFileTaskRepository` (in `tasklist-storage`): file-backed persistence
//! - `FakeTaskRepository` (in `tasklist-testing`): in-memory, deterministic
//!
//! # Dyn Compatibility
//!
//! This trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` to enable trait object usage (`Arc<dyn TaskRepository>`),
//! which is how stores and use cases hold their injected backend.

use crate::task::Task;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio::sync::watch;

/// Boxed future returned by repository operations
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Errors that can occur during repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Backend storage failed (unavailable, I/O error).
    #[error("storage error: {0}")]
    Storage(String),

    /// Persisted data could not be serialized or deserialized.
    ///
    /// Typically a corrupt persisted blob on `load`.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable storage for the full task collection.
///
/// # Contract
///
/// - `save` fully replaces prior persisted state.
/// - Every successful `load` and `save` publishes the resulting collection
///   to the channel returned by `observe`.
/// - Failures surface as [`RepositoryError`]; callers decide whether to
///   retry, fall back to empty state, or surface the error.
///
/// # Example
///
/// ```no_run
/// use tasklist_core::repository::{RepositoryError, TaskRepository};
///
/// async fn example<R: TaskRepository>(repo: &R) -> Result<(), RepositoryError> {
///     let tasks = repo.load().await?;
///     repo.save(tasks).await?;
///     Ok(())
/// }
/// ```
pub trait TaskRepository: Send + Sync {
    /// Observe the current task collection.
    ///
    /// The receiver replays the latest known collection to new subscribers
    /// and sees a new value on every successful `load` and `save`.
    fn observe(&self) -> watch::Receiver<Vec<Task>>;

    /// Load the persisted collection.
    ///
    /// Also publishes the loaded collection to the observable channel as a
    /// side effect. A backend with nothing persisted yet returns an empty
    /// collection (not an error).
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Storage`]: backend unavailable or read failed
    /// - [`RepositoryError::Serialization`]: persisted blob is corrupt
    fn load(&self) -> RepositoryFuture<'_, Vec<Task>>;

    /// Durably persist the full collection, replacing prior state, then
    /// publish it to the observable channel.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Storage`]: backend unavailable or write failed
    /// - [`RepositoryError::Serialization`]: collection could not be encoded
    fn save(&self, tasks: Vec<Task>) -> RepositoryFuture<'_, ()>;
}
