//! Base trait for store state.

/// Marker trait for store state objects.
///
/// States should be:
/// - Cheap to snapshot (Clone, handed to subscribers)
/// - Self-contained (all data a view needs to render)
/// - Comparable (PartialEq for detecting changes)
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}
