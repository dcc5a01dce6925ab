//! Device identity for VidShield.
//!
//! This crate handles:
//! - Collecting environment signals from the host (rendering surface, GPU,
//!   screen, locale, fonts, ...)
//! - Composing those signals into a fixed-length SHA-256 fingerprint
//! - Persisting the fingerprint in client-durable storage
//!
//! # Design Principles
//!
//! - **Never fail generation**: an unsupported capability becomes a sentinel
//!   signal instead of an error
//! - **Deterministic**: the same signal vector always yields the same digest
//! - **One slot**: the identity is a single raw string under one storage key
//! - **Injected host**: probes and storage are traits so tests and browsers
//!   plug in their own implementations
//!
//! # Example
//!
//! ```
//! use vidshield_device::{DeviceIdentityStore, MemoryStore, NativeProbe};
//!
//! let store = DeviceIdentityStore::new(MemoryStore::new(), NativeProbe::new());
//! let first = store.get_or_create();
//! let second = store.get_or_create();
//! assert_eq!(first.id, second.id);
//! ```

mod composer;
mod error;
mod fingerprint;
#[cfg(feature = "native")]
mod native;
mod probe;
pub mod signals;
mod storage;
mod store;

pub use composer::{compose, compose_from_probe, SEPARATOR};
pub use error::{DeviceError, DeviceResult, ProbeError, ProbeResult};
pub use fingerprint::{Fingerprint, FINGERPRINT_LEN};
#[cfg(feature = "native")]
pub use native::NativeProbe;
pub use probe::{CanvasOp, EnvironmentProbe, GpuDescriptor, ScreenGeometry};
pub use signals::{collect_all, Signal, SignalKind, CANVAS_SCENE, FONT_CANDIDATES};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{
    DeviceIdentity, DeviceIdentityStore, IdentityConfig, IdentityOrigin, DEFAULT_STORAGE_KEY,
};
