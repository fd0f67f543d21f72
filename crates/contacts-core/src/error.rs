//! Error types for the contacts fetcher
//!
//! Every failure a fetch can hit is surfaced to the caller through this type.
//! Nothing is recovered locally.

use thiserror::Error;

/// Result type alias for contact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the contacts fetcher
#[derive(Error, Debug)]
pub enum Error {
    /// Network unreachable, TLS failure, timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// The endpoint rejected the credential (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Any other non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response is JSON but lacks a required field
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors raised because the remote refused the credential
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}
