#![cfg(feature = "native")]

use tempfile::TempDir;
use vidshield_device::{
    DeviceIdentityStore, FileStore, IdentityOrigin, KeyValueStore, MemoryStore, NativeProbe,
};

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    store.remove("k").unwrap();
}

#[test]
fn file_store_missing_file_reads_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("identity.json"));
    assert_eq!(store.get("anything").unwrap(), None);
    store.remove("anything").unwrap();
    assert!(!store.path().exists());
}

#[test]
fn file_store_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("identity.json");
    let store = FileStore::new(&path);
    store.set("k", "v").unwrap();
    assert!(path.exists());
}

#[test]
fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");

    FileStore::new(&path).set("device_fingerprint", "abc").unwrap();
    let reopened = FileStore::new(&path);

    assert_eq!(
        reopened.get("device_fingerprint").unwrap().as_deref(),
        Some("abc")
    );
}

#[test]
fn file_store_keeps_other_keys_on_remove() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("identity.json"));
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);
    assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(FileStore::new(&path).get("k").is_err());
}

#[test]
fn file_store_set_replaces_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = FileStore::new(&path);
    store.set("k", "v").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn file_store_remove_repairs_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");
    std::fs::write(&path, r#"{"device_fingerprint": 42}"#).unwrap();

    let store = FileStore::new(&path);
    store.remove("device_fingerprint").unwrap();

    assert_eq!(store.get("device_fingerprint").unwrap(), None);
}

#[test]
fn identity_recovers_from_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = DeviceIdentityStore::new(FileStore::new(&path), NativeProbe::new());

    let first = store.get_or_create();
    let second = store.get_or_create();

    assert_eq!(first.origin, IdentityOrigin::Generated);
    assert_eq!(second.origin, IdentityOrigin::Stored);
    assert_eq!(first.id, second.id);
    assert_eq!(store.peek(), Some(first.id));
}

#[test]
fn clear_and_regenerate_repair_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = DeviceIdentityStore::new(FileStore::new(&path), NativeProbe::new());

    store.clear();
    assert!(store.storage().get("device_fingerprint").unwrap().is_none());

    std::fs::write(&path, "{not json").unwrap();
    let regenerated = store.regenerate();
    let after = store.get_or_create();

    assert_eq!(after.origin, IdentityOrigin::Stored);
    assert_eq!(after.id, regenerated.id);
}

#[test]
fn identity_persists_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("identity.json");

    let first = DeviceIdentityStore::new(FileStore::new(&path), NativeProbe::new()).get_or_create();
    let second =
        DeviceIdentityStore::new(FileStore::new(&path), NativeProbe::new()).get_or_create();

    assert_eq!(first.origin, IdentityOrigin::Generated);
    assert_eq!(second.origin, IdentityOrigin::Stored);
    assert_eq!(first.id, second.id);
}
