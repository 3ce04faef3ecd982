//! Error types for the tracks client.

use std::collections::BTreeMap;
use thiserror::Error;
use tracklist_core::SyncError;

/// Errors that can occur when talking to the tracks backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline, unreachable, or too slow to answer
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server rejected the payload (400/422)
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// Server does not know the id (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server returned another error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Request could not be built (e.g. provisional id)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Classify a transport error, separating "could not reach the server"
    /// from other request failures.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ClientError> for SyncError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) if e.is_decode() => SyncError::unexpected(e.to_string()),
            ClientError::Request(e) => SyncError::network(e.to_string()),
            ClientError::ServerUnreachable(msg) => SyncError::network(msg),
            ClientError::Validation { message, fields } => SyncError::Validation { message, fields },
            ClientError::NotFound(id) => SyncError::not_found(id),
            ClientError::ServerError { status, message } => {
                SyncError::unexpected(format!("server error ({}): {}", status, message))
            }
            ClientError::InvalidUrl(msg) | ClientError::InvalidRequest(msg) => {
                SyncError::invalid_input(msg)
            }
            ClientError::ParseError(msg) => SyncError::unexpected(msg),
        }
    }
}
