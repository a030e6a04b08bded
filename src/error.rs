//! Error Types
//!
//! Error types for the authentication client. Each concern gets its own
//! enum so callers can match without string inspection:
//!
//! - `AuthError` - outcomes of remote authentication operations
//! - `StoreError` - persistent session store failures
//! - `ValidationError` - pre-flight form/input validation failures
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.

use thiserror::Error;

/// Failure of a remote authentication operation.
///
/// Transport problems are mapped to fixed, user-presentable messages and are
/// never surfaced as raw exception text. HTTP rejections carry the message
/// extracted from the server's error body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server could not be reached (connection refused or DNS failure)
    #[error("Cannot connect to server. Please check if backend is running.")]
    Unreachable,

    /// The request timed out at the transport level
    #[error("Connection timeout. Please try again.")]
    TimedOut,

    /// The server answered with a non-2xx status; the message is extracted
    /// from the error body
    #[error("{0}")]
    ServerRejected(String),

    /// The server answered 2xx with an empty body where a payload is required
    #[error("Empty response")]
    EmptyResponse,

    /// Anything else, including malformed or unexpectedly shaped responses
    #[error("{0}")]
    Unknown(String),
}

/// Failure of the persistent session store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("session storage I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a persisted record failed
    #[error("session record encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

/// A pre-flight validation failure for a single input field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_render_fixed_messages() {
        assert_eq!(
            AuthError::Unreachable.to_string(),
            "Cannot connect to server. Please check if backend is running."
        );
        assert_eq!(
            AuthError::TimedOut.to_string(),
            "Connection timeout. Please try again."
        );
    }

    #[test]
    fn test_server_rejected_renders_body_message() {
        let error = AuthError::ServerRejected("Username is already taken!".to_string());
        assert_eq!(error.to_string(), "Username is already taken!");
    }

    #[test]
    fn test_store_error_converts_to_unknown() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: AuthError = StoreError::from(io).into();
        match error {
            AuthError::Unknown(message) => assert!(message.contains("denied")),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new("email", "Please enter a valid email");
        assert_eq!(error.field, "email");
        assert_eq!(error.to_string(), "Please enter a valid email");
    }
}
