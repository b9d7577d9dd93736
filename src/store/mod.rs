//! Generic client-side cache of a server collection.
//!
//! # Architecture
//!
//! Uses the MVI pattern from [`crate::mvi`]:
//! - `state.rs` - collection snapshot plus operation flags
//! - `intent.rs` - operation lifecycle events
//! - `reducer.rs` - state transitions (pure, no side effects)
//! - `resource.rs` - the store issuing requests and dispatching intents

mod error;
mod intent;
mod reducer;
mod resource;
mod state;

pub use error::StoreError;
pub use intent::ResourceIntent;
pub use reducer::ResourceReducer;
pub use resource::{Endpoints, Resource, ResourceStore};
pub use state::ResourceState;
