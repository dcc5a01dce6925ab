//! Fingerprint composition.

use crate::fingerprint::Fingerprint;
use crate::probe::EnvironmentProbe;
use crate::signals::{collect_all, Signal};
use sha2::{Digest, Sha256};

/// Token placed between signal values before hashing.
pub const SEPARATOR: &str = "|||";

/// Joins the signal values in the given order and hashes them with SHA-256.
///
/// Order is significant and never changed here: callers pass signals in
/// [`SignalKind::ALL`](crate::SignalKind::ALL) order.
#[must_use]
pub fn compose(signals: &[Signal]) -> Fingerprint {
    let combined = signals
        .iter()
        .map(|s| s.value.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let mut hasher = Sha256::new();
    hasher.update(combined.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();

    Fingerprint::from_digest(&digest)
}

/// Collects every signal from `probe` and composes them.
pub fn compose_from_probe<P: EnvironmentProbe + ?Sized>(probe: &P) -> Fingerprint {
    compose(&collect_all(probe))
}
