//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes; equal snapshots are not re-broadcast)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
