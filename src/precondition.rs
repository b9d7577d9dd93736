//! Checks performed before an operation is dispatched to a store.
//!
//! A failed precondition never reaches the network; the caller shows the
//! message straight away.

use thiserror::Error;

use crate::location::{Coordinates, PositionProvider};
use crate::models::{Borrowing, Device, FineStatus, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Please login to {action}")]
    NotSignedIn { action: &'static str },

    #[error("Admins cannot request to borrow devices.")]
    AdminCannotBorrow,

    #[error("Device information is missing")]
    DeviceMissing,

    #[error("Borrowing record not found")]
    BorrowingNotFound,

    #[error("No fine to pay for this borrowing")]
    NoFine,

    #[error("This fine has already been paid")]
    AlreadyPaid,

    #[error("Location not available. Please allow location access.")]
    LocationUnavailable,
}

/// Returns the signed-in user, or a message naming what login is needed for.
pub fn ensure_signed_in<'a>(
    user: Option<&'a User>,
    action: &'static str,
) -> Result<&'a User, PreconditionError> {
    user.ok_or(PreconditionError::NotSignedIn { action })
}

/// Only signed-in, non-admin users may request borrowings.
pub fn ensure_borrower(user: Option<&User>) -> Result<&User, PreconditionError> {
    if user.is_some_and(User::is_admin) {
        return Err(PreconditionError::AdminCannotBorrow);
    }
    ensure_signed_in(user, "request borrowing")
}

/// Borrowing requests need a borrower and a known device.
pub fn ensure_can_borrow<'a>(
    user: Option<&'a User>,
    device: Option<&Device>,
) -> Result<&'a User, PreconditionError> {
    let user = ensure_borrower(user)?;
    if device.is_none() {
        return Err(PreconditionError::DeviceMissing);
    }
    Ok(user)
}

/// Finds `borrowing_id` among `borrowings` and checks it has an open fine.
pub fn ensure_payable<'a>(
    borrowings: &'a [Borrowing],
    borrowing_id: &str,
) -> Result<&'a Borrowing, PreconditionError> {
    let borrowing = borrowings
        .iter()
        .find(|b| b.id == borrowing_id)
        .ok_or(PreconditionError::BorrowingNotFound)?;

    match borrowing.fine_status() {
        FineStatus::Payable(_) => Ok(borrowing),
        FineStatus::NotRequired => Err(PreconditionError::NoFine),
        FineStatus::Settled => Err(PreconditionError::AlreadyPaid),
    }
}

/// Reads the current position for tagging a device.
pub fn ensure_position(provider: &dyn PositionProvider) -> Result<Coordinates, PreconditionError> {
    provider
        .current()
        .ok_or(PreconditionError::LocationUnavailable)
}
