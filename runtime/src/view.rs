//! Equality-gated observable views.
//!
//! Derived views recompute on every state replacement, which means the
//! containing collection is usually a fresh allocation even when nothing a
//! subscriber cares about has changed. A [`View`] wraps a `watch` channel
//! and publishes only when the new value is NOT equal to the previous
//! emission under the view's comparator, so downstream consumers never see
//! redundant notifications.

use tokio::sync::watch;

/// A derived read-only view over store state
///
/// Subscribers get the latest value replayed immediately and a
/// notification for every subsequent emission that survives the gate.
///
/// # Example
///
/// ```
/// use tasklist_runtime::view::View;
///
/// let view = View::new(vec![1, 2], |a: &Vec<i32>, b: &Vec<i32>| a == b);
/// let mut rx = view.subscribe();
///
/// view.publish(vec![1, 2]); // structurally equal: suppressed
/// assert!(!rx.has_changed().unwrap_or(true));
///
/// view.publish(vec![1, 2, 3]);
/// assert!(rx.has_changed().unwrap_or(false));
/// ```
pub struct View<T> {
    tx: watch::Sender<T>,
    eq: fn(&T, &T) -> bool,
}

impl<T> View<T> {
    /// Creates a view with its initial value and comparator
    ///
    /// `eq` decides whether a newly computed value counts as "the same
    /// emission" as the previous one; equal values are suppressed.
    #[must_use]
    pub fn new(initial: T, eq: fn(&T, &T) -> bool) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx, eq }
    }

    /// Subscribe to the view
    ///
    /// The receiver starts at the latest published value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Publish a freshly computed value
    ///
    /// Suppressed when equal to the previous emission under the view's
    /// comparator, even if the container instance changed.
    pub fn publish(&self, next: T) {
        self.tx.send_if_modified(|current| {
            if (self.eq)(current, &next) {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests can unwrap

    use super::*;

    #[test]
    fn replays_latest_value_to_new_subscribers() {
        let view = View::new(1, |a: &i32, b: &i32| a == b);
        view.publish(5);

        let rx = view.subscribe();
        assert_eq!(*rx.borrow(), 5);
    }

    #[test]
    fn suppresses_equal_values() {
        let view = View::new(vec!["a".to_string()], |a: &Vec<String>, b: &Vec<String>| a == b);
        let mut rx = view.subscribe();
        rx.mark_unchanged();

        // Fresh allocation, same contents
        view.publish(vec!["a".to_string()]);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn emits_distinct_values() {
        let view = View::new(vec!["a".to_string()], |a: &Vec<String>, b: &Vec<String>| a == b);
        let mut rx = view.subscribe();
        rx.mark_unchanged();

        view.publish(vec!["a".to_string(), "b".to_string()]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 2);
    }

    #[test]
    fn comparator_decides_equality() {
        // Comparator only looks at length, so same-length values are
        // suppressed even when their contents differ.
        let view = View::new(vec![1], |a: &Vec<i32>, b: &Vec<i32>| a.len() == b.len());
        let mut rx = view.subscribe();
        rx.mark_unchanged();

        view.publish(vec![99]);
        assert!(!rx.has_changed().unwrap());

        view.publish(vec![1, 2]);
        assert!(rx.has_changed().unwrap());
    }
}
