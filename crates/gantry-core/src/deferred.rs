//! Staging queue for deferred state updates.
//!
//! State in this workspace changes over two channels. Urgent updates, such
//! as a confirmation gate opening or closing, are plain synchronous writes
//! and are visible to the very next read. Non-urgent updates, such as
//! mutation settlements and search-filter commits, are staged on a
//! [`DeferredQueue`] by whoever produced them and applied only when the
//! owning loop calls [`drain`](DeferredQueue::drain) at an idle point.
//!
//! The queue is FIFO, so staged updates apply in the order they were
//! produced, and a consumer that applies "last write wins" semantics can do
//! so by folding the drained batch.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

/// Thread-safe FIFO staging queue for deferred updates.
///
/// Producers [`push`](Self::push) from any task; the single owner
/// [`drain`](Self::drain)s when idle and applies the batch. The queue never
/// blocks producers on consumers or vice versa beyond the internal lock.
///
/// # Example
///
/// ```
/// use gantry_core::DeferredQueue;
///
/// let staged: DeferredQueue<&str> = DeferredQueue::new();
/// staged.push("first");
/// staged.push("second");
/// assert_eq!(staged.drain(), vec!["first", "second"]);
/// assert!(staged.is_empty());
/// ```
pub struct DeferredQueue<T> {
    staged: Mutex<VecDeque<T>>,
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            staged: Mutex::new(VecDeque::new()),
        }
    }

    /// Stage an update for the next drain.
    pub fn push(&self, update: T) {
        let mut staged = self.staged.lock().unwrap_or_else(|e| {
            tracing::warn!("DeferredQueue lock poisoned, recovering");
            e.into_inner()
        });
        staged.push_back(update);
    }

    /// Take every staged update, oldest first, leaving the queue empty.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        let mut staged = self.staged.lock().unwrap_or_else(|e| {
            tracing::warn!("DeferredQueue lock poisoned, recovering");
            e.into_inner()
        });
        staged.drain(..).collect()
    }

    /// Number of staged updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DeferredQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("staged", &self.len())
            .finish()
    }
}
