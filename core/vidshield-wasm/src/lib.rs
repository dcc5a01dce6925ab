//! Browser bindings for VidShield device identity.
//!
//! Exposes the identity lifecycle to JavaScript:
//!
//! ```javascript
//! import init, { getOrCreateDeviceId, regenerateDeviceId } from './pkg/vidshield_wasm.js';
//! await init();
//! const id = getOrCreateDeviceId();
//! ```
//!
//! Signals are read from `window`/`navigator`/`screen` and the identity is
//! kept in `localStorage` under `device_fingerprint`.

mod js;
mod probe;
mod storage;

pub use probe::BrowserProbe;
pub use storage::LocalStorage;

use vidshield_device::DeviceIdentityStore;
use wasm_bindgen::prelude::*;

fn identity_store() -> DeviceIdentityStore<LocalStorage, BrowserProbe> {
    DeviceIdentityStore::new(LocalStorage::new(), BrowserProbe::new())
}

/// Returns the stored device id, generating and persisting one on first use.
#[wasm_bindgen(js_name = getOrCreateDeviceId)]
pub fn get_or_create_device_id() -> String {
    identity_store().get_or_create().id.into()
}

/// Forgets the stored device id.
#[wasm_bindgen(js_name = clearDeviceId)]
pub fn clear_device_id() {
    identity_store().clear();
}

/// Discards the stored device id and returns a freshly generated one.
#[wasm_bindgen(js_name = regenerateDeviceId)]
pub fn regenerate_device_id() -> String {
    identity_store().regenerate().id.into()
}
