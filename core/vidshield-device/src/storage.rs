//! Key-value storage backends for the identity slot.

use crate::error::{DeviceError, DeviceResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Client-durable string storage, in the shape of browser `localStorage`.
pub trait KeyValueStore {
    /// Reads a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> DeviceResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> DeviceResult<()>;

    /// Removes a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> DeviceResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> DeviceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DeviceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> DeviceResult<()> {
        (**self).remove(key)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DeviceResult<Option<String>> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DeviceResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DeviceResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Durable storage in a single JSON file mapping keys to string values.
///
/// The file is re-read on every access so that several processes sharing
/// it see each other's writes; the last writer wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (without creating) a store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the store at the platform data directory
    /// (`<data_dir>/vidshield/identity.json`).
    #[cfg(feature = "native")]
    pub fn default_location() -> DeviceResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| DeviceError::Storage("no platform data directory".into()))?;
        Ok(Self::new(dir.join("vidshield").join("identity.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> DeviceResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the map ahead of a write. An unparseable file is discarded
    /// (returned as an empty map) so the write replaces it; the flag reports
    /// whether that happened.
    fn read_map_for_write(&self) -> DeviceResult<(BTreeMap<String, String>, bool)> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(DeviceError::Serialization(e)) => {
                warn!(
                    "identity store {} is corrupt, replacing it: {e}",
                    self.path.display()
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> DeviceResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("wrote identity store {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DeviceResult<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DeviceResult<()> {
        let _guard = lock(&self.write_lock);
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> DeviceResult<()> {
        let _guard = lock(&self.write_lock);
        let (mut map, discarded) = self.read_map_for_write()?;
        if map.remove(key).is_some() || discarded {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
