//! Device identity lifecycle: get-or-create, clear, regenerate.

use crate::composer::compose_from_probe;
use crate::fingerprint::Fingerprint;
use crate::probe::EnvironmentProbe;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Storage key reserved for the device identity.
pub const DEFAULT_STORAGE_KEY: &str = "device_fingerprint";

/// Configuration for the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Key of the single storage slot holding the fingerprint.
    pub storage_key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Where an identity handed out by the store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityOrigin {
    /// Read back from storage.
    Stored,
    /// Produced by a generation pass during this call.
    Generated,
}

/// The persisted device identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub id: Fingerprint,
    pub origin: IdentityOrigin,
}

/// Owns the device identity slot.
///
/// There is no internal lock: two first-time calls racing on a shared
/// backend may both generate, and the last write wins. Both derive from the
/// same signals, so they normally agree.
pub struct DeviceIdentityStore<S, P> {
    storage: S,
    probe: P,
    config: IdentityConfig,
}

impl<S: KeyValueStore, P: EnvironmentProbe> DeviceIdentityStore<S, P> {
    /// Creates a store with the default storage key.
    pub fn new(storage: S, probe: P) -> Self {
        Self::with_config(storage, probe, IdentityConfig::default())
    }

    /// Creates a store with a custom configuration.
    pub fn with_config(storage: S, probe: P, config: IdentityConfig) -> Self {
        Self {
            storage,
            probe,
            config,
        }
    }

    /// Returns the storage key in use.
    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted fingerprint without generating one.
    ///
    /// Unreadable or malformed slots read as absent.
    pub fn peek(&self) -> Option<Fingerprint> {
        let raw = match self.storage.get(&self.config.storage_key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read device identity, treating as absent: {e}");
                return None;
            }
        };
        match Fingerprint::parse(&raw) {
            Ok(fp) => Some(fp),
            Err(e) => {
                warn!("discarding stored device identity: {e}");
                None
            }
        }
    }

    /// Returns the persisted identity, generating and persisting one first
    /// when the slot is empty.
    ///
    /// A failed write is logged and the fresh identity is still returned.
    pub fn get_or_create(&self) -> DeviceIdentity {
        if let Some(id) = self.peek() {
            debug!("device identity read from storage");
            return DeviceIdentity {
                id,
                origin: IdentityOrigin::Stored,
            };
        }
        self.generate()
    }

    /// Removes the persisted identity. Never fails; backend errors are logged.
    pub fn clear(&self) {
        match self.storage.remove(&self.config.storage_key) {
            Ok(()) => debug!("device identity cleared"),
            Err(e) => warn!("failed to clear device identity: {e}"),
        }
    }

    /// Clears the slot and runs a fresh generation pass.
    ///
    /// Always generates, even when the clear step failed to remove the old
    /// value.
    pub fn regenerate(&self) -> DeviceIdentity {
        self.clear();
        self.generate()
    }

    fn generate(&self) -> DeviceIdentity {
        let id = compose_from_probe(&self.probe);
        match self.storage.set(&self.config.storage_key, id.as_str()) {
            Ok(()) => info!("generated new device identity"),
            Err(e) => warn!("generated device identity but could not persist it: {e}"),
        }

        DeviceIdentity {
            id,
            origin: IdentityOrigin::Generated,
        }
    }
}
