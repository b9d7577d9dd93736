//! State held by a resource store.

use crate::models::Entity;
use crate::mvi::StoreState;

/// Cached view of one server collection plus the status of the last
/// operation issued against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<E> {
    /// Full collection as last listed.
    pub items: Vec<E>,
    /// Secondary list: search results, one user's borrowings, one
    /// device's posts.
    pub scoped: Vec<E>,
    /// Entity loaded by a fetch-one.
    pub selected: Option<E>,
    /// Server message (or error message) from the last completed operation.
    pub message: Option<String>,
    pub is_loading: bool,
    pub is_success: bool,
    pub is_error: bool,
}

impl<E> Default for ResourceState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            scoped: Vec::new(),
            selected: None,
            message: None,
            is_loading: false,
            is_success: false,
            is_error: false,
        }
    }
}

impl<E: Entity> StoreState for ResourceState<E> {}

impl<E: Entity> ResourceState<E> {
    /// Looks up an entity by id in the main list, then the scoped list.
    pub fn find(&self, id: &str) -> Option<&E> {
        self.items
            .iter()
            .chain(self.scoped.iter())
            .find(|entity| entity.id() == id)
    }
}
