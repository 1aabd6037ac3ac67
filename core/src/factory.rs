//! Task construction rules.
//!
//! The factory is the only place new tasks come from. It normalizes input
//! instead of rejecting it: titles and categories are trimmed, and an empty
//! category falls back to [`DEFAULT_CATEGORY`]. Input validation (e.g.
//! refusing empty titles) is a concern of the caller, not this layer.

use crate::environment::Clock;
use crate::task::{Task, TaskId, TaskStatus};
use std::sync::Arc;

/// Category assigned when the input category is empty after trimming
pub const DEFAULT_CATEGORY: &str = "general";

/// Builds new tasks with normalized input
///
/// Time comes from an injected [`Clock`] so tests can construct tasks with
/// deterministic timestamps.
///
/// # Example
///
/// ```
/// use tasklist_core::TaskFactory;
/// use tasklist_core::environment::SystemClock;
/// use std::sync::Arc;
///
/// let factory = TaskFactory::new(Arc::new(SystemClock));
/// let task = factory.create("  Buy milk  ", "");
/// assert_eq!(task.title, "Buy milk");
/// assert_eq!(task.category, "general");
/// ```
#[derive(Clone)]
pub struct TaskFactory {
    clock: Arc<dyn Clock>,
}

impl TaskFactory {
    /// Creates a new `TaskFactory` with the given clock
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Creates a new pending task
    ///
    /// Trims both inputs and defaults the category to [`DEFAULT_CATEGORY`]
    /// when it is empty after trimming. Never fails; an empty title is
    /// accepted as-is. The task gets a fresh unique id and `created_at`
    /// from the factory's clock.
    #[must_use]
    pub fn create(&self, title: &str, category: &str) -> Task {
        let category = category.trim();

        Task {
            id: TaskId::new(),
            title: title.trim().to_string(),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            status: TaskStatus::Pending,
            created_at: self.clock.now(),
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_factory() -> TaskFactory {
        let time = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        TaskFactory::new(Arc::new(TestClock(time)))
    }

    #[test]
    fn trims_title_and_category() {
        let task = fixed_factory().create("  Buy milk  ", "  home  ");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.category, "home");
    }

    #[test]
    fn empty_category_defaults_to_general() {
        let task = fixed_factory().create("Buy milk", "   ");
        assert_eq!(task.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn empty_title_is_accepted() {
        let task = fixed_factory().create("   ", "home");
        assert_eq!(task.title, "");
    }

    #[test]
    fn new_task_is_pending_with_no_completion_time() {
        let task = fixed_factory().create("Buy milk", "home");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn created_at_comes_from_the_clock() {
        let factory = fixed_factory();
        let a = factory.create("A", "work");
        let b = factory.create("B", "work");
        assert_eq!(a.created_at, b.created_at);
    }

    #[test]
    fn ids_are_fresh_per_task() {
        let factory = fixed_factory();
        let ids: Vec<_> = (0..100).map(|_| factory.create("T", "work").id).collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    proptest! {
        #[test]
        fn title_is_always_trimmed(title in ".*", category in ".*") {
            let task = fixed_factory().create(&title, &category);
            prop_assert_eq!(task.title.as_str(), title.trim());
        }

        #[test]
        fn category_is_never_empty(title in ".*", category in ".*") {
            let task = fixed_factory().create(&title, &category);
            prop_assert!(!task.category.is_empty());
            if category.trim().is_empty() {
                prop_assert_eq!(task.category.as_str(), DEFAULT_CATEGORY);
            } else {
                prop_assert_eq!(task.category.as_str(), category.trim());
            }
        }

        #[test]
        fn created_tasks_start_pending(title in ".*", category in ".*") {
            let task = fixed_factory().create(&title, &category);
            prop_assert_eq!(task.status, TaskStatus::Pending);
            prop_assert_eq!(task.completed_at, None);
        }
    }
}
