use vidshield_device::{DeviceError, Fingerprint, ProbeError};

#[test]
fn error_display_storage() {
    let err = DeviceError::Storage("quota exceeded".into());
    let msg = format!("{err}");
    assert!(msg.contains("storage"));
    assert!(msg.contains("quota exceeded"));
}

#[test]
fn error_display_invalid_fingerprint() {
    let err = DeviceError::InvalidFingerprint("xyz".into());
    assert!(format!("{err}").contains("invalid fingerprint"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let err: DeviceError = serde_err.unwrap_err().into();
    assert!(format!("{err}").contains("serialization"));
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: DeviceError = io.into();
    assert!(format!("{err}").contains("IO error"));
}

#[test]
fn probe_error_display() {
    assert!(ProbeError::Unsupported("webgl").to_string().contains("webgl"));
    assert!(ProbeError::Blocked("denied".into()).to_string().contains("blocked"));
}

#[test]
fn fingerprint_parse_rejects_bad_input() {
    assert!(Fingerprint::parse("").is_err());
    assert!(Fingerprint::parse(&"A".repeat(64)).is_err());
    assert!(Fingerprint::parse(&"g".repeat(64)).is_err());
    assert!(Fingerprint::parse(&"a".repeat(63)).is_err());
    assert!(Fingerprint::parse(&"a".repeat(64)).is_ok());
}

#[test]
fn fingerprint_serde_is_plain_string() {
    let fp = Fingerprint::parse(&"ab".repeat(32)).unwrap();
    let json = serde_json::to_string(&fp).unwrap();
    assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
    let parsed: Fingerprint = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, fp);
    assert!(serde_json::from_str::<Fingerprint>("\"short\"").is_err());
}

#[test]
fn error_is_debug() {
    let err = DeviceError::Storage("x".into());
    let _ = format!("{err:?}");
}
