//! Error types for the device identity module.

use thiserror::Error;

/// Device-identity errors.
///
/// None of these escape the identity lifecycle operations; they surface from
/// storage backends and parsing, and the store recovers from them locally.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Storage backend failed to read, write or remove a slot.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored or supplied fingerprint is not 64 lowercase hex characters.
    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file-backed storage).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for device-identity operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Failure of a single host capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The host does not provide this capability at all.
    #[error("capability unsupported: {0}")]
    Unsupported(&'static str),

    /// The capability exists but the host refused or failed the call.
    #[error("capability blocked: {0}")]
    Blocked(String),
}

/// Result type for host probes.
pub type ProbeResult<T> = Result<T, ProbeError>;
