use thiserror::Error;

use crate::api::{ApiError, GENERIC_FAILURE};
use crate::session::StorageError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The resource has no endpoint for the operation.
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    /// A mutation succeeded but its response lacked the resulting entity.
    #[error("Response to {operation} on {resource} did not include '{key}'")]
    MissingEntity {
        resource: &'static str,
        operation: &'static str,
        key: &'static str,
    },

    #[error("Session storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// The message recorded in store state and shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Api(e) => e.user_message(),
            StoreError::Unsupported { .. } => self.to_string(),
            StoreError::MissingEntity { .. } | StoreError::Storage(_) => {
                GENERIC_FAILURE.to_string()
            }
        }
    }

    /// HTTP status when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api(e) => e.status(),
            _ => None,
        }
    }
}
