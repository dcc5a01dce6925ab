//! The device fingerprint identifier.

use crate::error::{DeviceError, DeviceResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint in hex characters (SHA-256).
pub const FINGERPRINT_LEN: usize = 64;

/// A 256-bit digest of the device's signal vector, rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps raw digest bytes.
    #[must_use]
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parses a stored fingerprint, rejecting anything that is not
    /// 64 lowercase hex characters.
    pub fn parse(s: &str) -> DeviceResult<Self> {
        let valid = s.len() == FINGERPRINT_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(DeviceError::InvalidFingerprint(s.to_string()))
        }
    }

    /// Returns the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = DeviceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
