//! Crate-wide error type for configuration, seed data and I/O.

use thiserror::Error;

use crate::moderation::core::ids::IdError;

/// Console error type (configuration, seed data, I/O).
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Invalid conversation or message content.
    #[error("invalid conversation: {0}")]
    InvalidConversation(String),
    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;
