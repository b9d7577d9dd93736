//! The four server collections the client caches.

mod borrowings;
mod devices;
mod posts;
mod users;

pub use borrowings::{BorrowingStore, Borrowings, PayFineError};
pub use devices::{DeviceStore, Devices};
pub use posts::{PostStore, Posts, ReactionError};
pub use users::{NoDraft, UserStore, Users};
