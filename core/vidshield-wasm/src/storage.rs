//! [`KeyValueStore`] over `window.localStorage`.

use crate::js;
use vidshield_device::{DeviceError, DeviceResult, KeyValueStore, ProbeError};
use wasm_bindgen::JsValue;

/// The page's `localStorage`.
///
/// The storage object is looked up on every call; access can be revoked
/// (private browsing, storage partitioning) at any time. A missing
/// `localStorage` or a thrown exception (e.g. `QuotaExceededError` from
/// `setItem`) surfaces as [`DeviceError::Storage`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn handle(&self) -> DeviceResult<JsValue> {
        js::property(&js_sys::global(), "localStorage")
            .map_err(storage_error)
    }

    fn invoke(&self, method: &'static str, args: &[JsValue]) -> DeviceResult<JsValue> {
        let storage = self.handle()?;
        js::call(&storage, method, args).map_err(storage_error)
    }
}

fn storage_error(error: ProbeError) -> DeviceError {
    DeviceError::Storage(error.to_string())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> DeviceResult<Option<String>> {
        Ok(self.invoke("getItem", &[key.into()])?.as_string())
    }

    fn set(&self, key: &str, value: &str) -> DeviceResult<()> {
        self.invoke("setItem", &[key.into(), value.into()]).map(drop)
    }

    fn remove(&self, key: &str) -> DeviceResult<()> {
        self.invoke("removeItem", &[key.into()]).map(drop)
    }
}
