//! Domain types for the task list.
//!
//! A task list is an ordered collection of tasks that can be created,
//! completed, and deleted. New tasks are prepended, so the collection reads
//! newest-first unless a caller re-derives the order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task
///
/// Generated once at creation and never reassigned. Serializes as the plain
/// UUID string so persisted collections stay readable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random `TaskId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TaskId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not yet completed
    Pending,
    /// Completed
    Done,
}

impl TaskStatus {
    /// Whether this status is `Done`
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title of the task
    pub title: String,
    /// Category the task belongs to
    pub category: String,
    /// Completion status
    pub status: TaskStatus,
    /// When the task was created (logical ordering key)
    pub created_at: DateTime<Utc>,
    /// When the task was completed; only set while `status` is `Done`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns a copy with the completion status flipped.
    ///
    /// Moving to `Done` stamps `completed_at` with `now`; moving back to
    /// `Pending` clears it, so `completed_at` is never set on a pending
    /// task.
    #[must_use]
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let mut task = self.clone();
        match task.status {
            TaskStatus::Pending => {
                task.status = TaskStatus::Done;
                task.completed_at = Some(now);
            }
            TaskStatus::Done => {
                task.status = TaskStatus::Pending;
                task.completed_at = None;
            }
        }
        task
    }
}
