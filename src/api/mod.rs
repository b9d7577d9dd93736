//! HTTP access to the remote borrowing API.

mod client;
mod envelope;
mod error;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use error::{ApiError, GENERIC_FAILURE};
