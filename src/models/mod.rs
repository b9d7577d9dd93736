//! Client-side representations of server records.
//!
//! The server is the source of truth; these types mirror what it returns
//! after normalizing nested references into one canonical shape.

mod borrowing;
mod dashboard;
mod device;
mod link;
mod post;
mod user;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use borrowing::{Borrowing, BorrowingStatus, FineStatus, PaymentStatus};
pub use dashboard::{Notification, NotificationKind, Stats};
pub use device::{Device, DeviceStatus, DeviceSummary};
pub use post::{Post, Reaction};
pub use user::{AccountStatus, Role, User, UserPatch, UserSummary};

/// Anything carrying a server-assigned `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A top-level record held in a resource store.
pub trait Entity:
    Identified + Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}
