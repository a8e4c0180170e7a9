//! One-shot event fields for UI state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// A state field that fires at most once.
///
/// Snapshots are cloned for every subscriber, so the consumed flag is shared
/// between all clones of the same event: once any observer consumes it, no
/// replay of that snapshot hands the payload out again. Two events compare
/// equal only when they come from the same [`Event::new`] call.
pub struct Event<T> {
    id: u64,
    payload: Arc<T>,
    consumed: Arc<AtomicBool>,
}

impl<T> Event<T> {
    pub fn new(payload: T) -> Self {
        Self {
            id: NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed),
            payload: Arc::new(payload),
            consumed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the payload the first time it is called, `None` afterwards.
    pub fn consume(&self) -> Option<&T> {
        if self.consumed.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(&self.payload)
        }
    }

    /// Reads the payload without consuming it.
    pub fn peek(&self) -> &T {
        &self.payload
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::SeqCst)
    }
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            payload: Arc::clone(&self.payload),
            consumed: Arc::clone(&self.consumed),
        }
    }
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Event<T> {}

impl<T: fmt::Debug> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("payload", &self.payload)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

/// Wraps any value into a fresh [`Event`].
pub trait ToEvent: Sized {
    fn to_event(self) -> Event<Self>;
}

impl<T> ToEvent for T {
    fn to_event(self) -> Event<Self> {
        Event::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_returns_payload_once() {
        let event = "open dialog".to_event();
        assert_eq!(event.consume(), Some(&"open dialog"));
        assert_eq!(event.consume(), None);
        assert_eq!(*event.peek(), "open dialog");
    }

    #[test]
    fn clones_share_consumed_flag() {
        let event = Event::new(3);
        let replay = event.clone();
        assert!(event.consume().is_some());
        assert!(replay.is_consumed());
        assert!(replay.consume().is_none());
    }

    #[test]
    fn equality_follows_identity_not_payload() {
        let first = Event::new("same");
        let second = Event::new("same");
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }
}
