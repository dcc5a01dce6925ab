//! Error types for the player layer.

use thiserror::Error;

/// Result type for player operations.
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Errors that can occur while mounting a protected player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No tokio runtime is available to drive the watermark timer.
    #[error("no async runtime available to drive the watermark timer")]
    NoRuntime,

    /// The host failed an operation the player could not recover from.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Failures reported by a [`PlayerHost`](crate::PlayerHost).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The platform refused the request (e.g. fullscreen permission denied).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The platform does not support the operation.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// Any other host-side failure.
    #[error("host failure: {0}")]
    Failed(String),
}
