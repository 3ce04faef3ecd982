/// Core error types for Tracklist
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias using `SyncError`
pub type Result<T> = std::result::Result<T, SyncError>;

/// Failure taxonomy surfaced to callers of the sync layer.
///
/// None of these are fatal: the store stays usable after any of them and the
/// caller either retries or re-fetches the last good query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Transport-level failure (connection refused, timeout, broken body)
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the request (4xx with a message)
    #[error("Validation failed: {message}")]
    Validation {
        /// General message reported by the server
        message: String,
        /// Per-field messages, keyed by field name
        fields: BTreeMap<String, String>,
    },

    /// The id does not exist on the server
    #[error("Track not found: {0}")]
    NotFound(String),

    /// Rejected on the client before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything else (5xx, unparseable response)
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a validation error without per-field details
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Whether re-issuing the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Unexpected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_in_display() {
        let err = SyncError::validation("Title is required");
        assert_eq!(err.to_string(), "Validation failed: Title is required");
    }

    #[test]
    fn only_transport_and_unexpected_are_retryable() {
        assert!(SyncError::network("timeout").is_retryable());
        assert!(SyncError::unexpected("500").is_retryable());
        assert!(!SyncError::not_found("1").is_retryable());
        assert!(!SyncError::invalid_input("x").is_retryable());
        assert!(!SyncError::validation("x").is_retryable());
    }
}
