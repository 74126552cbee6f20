//! Failure type shared by all backend client implementations.

use thiserror::Error;

/// Errors surfaced by a PocketBase client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The backend responded with a non-success status. `message` carries the
    /// backend's own error text when it could be decoded, otherwise the raw
    /// response body.
    #[error("http {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        ClientError::Api {
            status: 404,
            message: format!("{what} not found"),
        }
    }
}
