//! # Tasklist Storage
//!
//! File-backed implementation of the task repository contract.
//!
//! The whole collection is persisted as one JSON document, replaced on
//! every save. This mirrors the single-blob model of the application this
//! backend stands in for: durable state is small, owned by one process,
//! and always written wholesale.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_storage::JsonFileTaskRepository;
//!
//! let repo = JsonFileTaskRepository::new("tasks.json");
//! let tasks = repo.load().await?;
//! ```

use std::io;
use std::path::PathBuf;
use tasklist_core::repository::{RepositoryError, RepositoryFuture, TaskRepository};
use tasklist_core::task::Task;
use tokio::sync::watch;

/// Task repository persisting the collection to a single JSON file
///
/// Writes go through a temporary file in the same directory followed by a
/// rename, so a crash mid-save never leaves a truncated blob behind. A
/// missing file loads as an empty collection; a corrupt file surfaces as
/// [`RepositoryError::Serialization`] and is left untouched for
/// inspection.
pub struct JsonFileTaskRepository {
    path: PathBuf,
    subject: watch::Sender<Vec<Task>>,
}

impl JsonFileTaskRepository {
    /// Creates a repository backed by the file at `path`
    ///
    /// The file and its parent directories are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (subject, _) = watch::channel(Vec::new());
        Self {
            path: path.into(),
            subject,
        }
    }

    /// The file this repository persists to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TaskRepository for JsonFileTaskRepository {
    fn observe(&self) -> watch::Receiver<Vec<Task>> {
        self.subject.subscribe()
    }

    fn load(&self) -> RepositoryFuture<'_, Vec<Task>> {
        Box::pin(async move {
            let tasks: Vec<Task> = match tokio::fs::read(&self.path).await {
                Ok(bytes) => serde_json::from_slice(&bytes)
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
                Err(e) => return Err(RepositoryError::Storage(e.to_string())),
            };

            tracing::debug!(
                path = %self.path.display(),
                count = tasks.len(),
                "task collection loaded"
            );
            self.subject.send_replace(tasks.clone());
            Ok(tasks)
        })
    }

    fn save(&self, tasks: Vec<Task>) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            let bytes = serde_json::to_vec_pretty(&tasks)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
                }
            }

            // Write-then-rename keeps the previous blob intact until the
            // replacement is fully on disk.
            let tmp = self.path.with_extension("json.tmp");
            tokio::fs::write(&tmp, &bytes)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
            tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;

            tracing::debug!(
                path = %self.path.display(),
                count = tasks.len(),
                "task collection saved"
            );
            self.subject.send_replace(tasks);
            Ok(())
        })
    }
}
