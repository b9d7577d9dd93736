//! The signed-in identity and its durable copy.
//!
//! Same MVI layout as [`crate::store`]; the store additionally writes the
//! identity through a [`SessionStorage`] whenever it changes.

mod intent;
mod reducer;
mod state;
mod storage;
mod store;

pub use intent::SessionIntent;
pub use reducer::SessionReducer;
pub use state::SessionState;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{SessionStore, SESSION_KEY};
