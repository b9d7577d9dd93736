//! Base trait for intents dispatched into a store.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - An operation being issued (request started)
/// - A server response (entities listed, created, updated, removed)
/// - A failure carrying the message to surface
/// - Local-only edits (logout, identity patch)
pub trait Intent: Send + 'static {}
