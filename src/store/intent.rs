//! Intents for resource stores.

use crate::models::Entity;
use crate::mvi::Intent;

/// Lifecycle events of an operation against one resource collection.
#[derive(Debug)]
pub enum ResourceIntent<E> {
    /// A request was issued.
    Started,

    /// The full collection arrived.
    Listed { items: Vec<E> },

    /// A filtered collection arrived (search, per-user, per-device).
    ScopedListed { items: Vec<E> },

    /// A single entity arrived.
    Selected { entity: E },

    /// The server created an entity.
    Created { entity: E, message: Option<String> },

    /// The server accepted an update. Without an entity nothing is replaced.
    Updated {
        entity: Option<E>,
        message: Option<String>,
    },

    /// The server deleted `id`.
    Removed { id: String, message: Option<String> },

    /// The operation failed.
    Failed { message: String },
}

impl<E: Entity> Intent for ResourceIntent<E> {}
