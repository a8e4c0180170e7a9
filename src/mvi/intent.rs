//! Base trait for intentions (user/system actions) in MVI architecture.

/// Marker trait for intention objects.
///
/// Intentions represent:
/// - User actions (search, increment, select)
/// - System events (a fresh list of counters from a feed)
///
/// Each intention is consumed exactly once, either by the sequential handler
/// of a [`StateStore`](super::StateStore) or, for system intentions a handler
/// builds itself, by a [`Reducer`](super::Reducer). Only the former are
/// published.
pub trait Intent: Send + 'static {}
