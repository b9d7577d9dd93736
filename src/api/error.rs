//! Error types for API calls.
//!
//! Separates failures where the request never completed from failures the
//! server explicitly rejected, so callers can show *why* an operation
//! failed rather than only *that* it failed.

use thiserror::Error;

/// Message shown when no server-provided explanation is available.
pub const GENERIC_FAILURE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be completed (DNS, connect, reset, timeout).
    #[error("Request to '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Server rejected '{path}' with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        path: String,
        status: u16,
        message: Option<String>,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot carry endpoint paths.
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// The most specific message available for display.
    ///
    /// An explicit rejection payload wins over everything else; transport
    /// and decoding failures collapse into [`GENERIC_FAILURE`].
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Rejected { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            ApiError::Transport { .. } | ApiError::Decode { .. } | ApiError::InvalidUrl { .. } => {
                GENERIC_FAILURE.to_string()
            }
        }
    }

    /// HTTP status of a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server answered but refused the operation.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

/// Pulls the explanation out of a rejection body.
///
/// Accepts `{"message": ".."}`, `{"error": ".."}` and
/// `{"error": {"message": ".."}}`.
pub(crate) fn rejection_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let text = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| value.get("error").and_then(|e| e.as_str()))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
        })?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(message: Option<&str>) -> ApiError {
        ApiError::Rejected {
            path: "/deleteDevice/d1".to_string(),
            status: 400,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_rejection_message_takes_precedence() {
        let err = rejected(Some("Cannot delete: device in use"));
        assert_eq!(err.user_message(), "Cannot delete: device in use");
        assert_eq!(err.status(), Some(400));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rejection_without_message_uses_status() {
        assert_eq!(
            rejected(None).user_message(),
            "Request failed with status code 400"
        );
    }

    #[test]
    fn test_decode_failure_is_generic() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            path: "/showDevices".to_string(),
            source,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_rejection_message_shapes() {
        assert_eq!(
            rejection_message(br#"{"message":"Email already exists"}"#).as_deref(),
            Some("Email already exists")
        );
        assert_eq!(
            rejection_message(br#"{"error":"not found"}"#).as_deref(),
            Some("not found")
        );
        assert_eq!(
            rejection_message(br#"{"error":{"message":"payment declined"}}"#).as_deref(),
            Some("payment declined")
        );
        assert!(rejection_message(br#"{"message":"  "}"#).is_none());
        assert!(rejection_message(b"<html>Bad Gateway</html>").is_none());
    }
}
