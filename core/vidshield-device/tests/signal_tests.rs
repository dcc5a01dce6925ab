mod common;

use common::ScriptedProbe;
use pretty_assertions::assert_eq;
use vidshield_device::signals::{collect_fonts, collect_gpu};
use vidshield_device::{collect_all, ProbeError, Signal, SignalKind, FONT_CANDIDATES};

fn values(signals: &[Signal]) -> Vec<&str> {
    signals.iter().map(|s| s.value.as_str()).collect()
}

#[test]
fn collect_all_follows_fixed_order() {
    let signals = collect_all(&ScriptedProbe::default());
    let kinds: Vec<SignalKind> = signals.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, SignalKind::ALL.to_vec());
}

#[test]
fn collect_all_formats_each_signal() {
    let signals = collect_all(&ScriptedProbe::default());
    assert_eq!(
        values(&signals),
        vec![
            "data:image/png;base64,AAAA",
            "Intel Inc.~Intel Iris OpenGL Engine",
            "1920x1080x24",
            "Europe/Berlin",
            "de-DE",
            "MacIntel",
            "8",
            "8",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)",
            "Arial,Georgia",
            "0",
            "5",
        ]
    );
}

#[test]
fn failing_probes_become_sentinels() {
    let signals = collect_all(&ScriptedProbe::all_failing());
    assert_eq!(signals.len(), SignalKind::ALL.len());
    for signal in &signals {
        assert!(signal.is_sentinel(), "{} was {:?}", signal.kind, signal.value);
    }
    assert_eq!(signals[0].value, "canvas-error");
    assert_eq!(signals[1].value, "webgl-error");
    assert_eq!(signals[6].value, "unknown");
    assert_eq!(signals[9].value, "fonts-error");
}

#[test]
fn missing_debug_extension_has_its_own_sentinel() {
    let probe = ScriptedProbe {
        gpu: Ok(None),
        ..Default::default()
    };
    assert_eq!(collect_gpu(&probe), "webgl-no-debug-info");
}

#[test]
fn unexposed_counts_read_unknown_or_zero() {
    let probe = ScriptedProbe {
        cpu: Ok(None),
        memory: Ok(None),
        touch: Ok(None),
        plugins: Ok(0),
        ..Default::default()
    };
    let signals = collect_all(&probe);
    assert_eq!(signals[6].value, "unknown");
    assert_eq!(signals[7].value, "unknown");
    assert_eq!(signals[10].value, "0");
    assert_eq!(signals[11].value, "0");
}

#[test]
fn fractional_device_memory_keeps_decimal() {
    let probe = ScriptedProbe {
        memory: Ok(Some(0.5)),
        ..Default::default()
    };
    assert_eq!(collect_all(&probe)[7].value, "0.5");
}

#[test]
fn fonts_are_reported_in_candidate_order() {
    let probe = ScriptedProbe {
        fonts: Ok(vec!["Impact", "Arial", "Courier New"]),
        ..Default::default()
    };
    assert_eq!(collect_fonts(&probe), "Arial,Courier New,Impact");
}

#[test]
fn fonts_with_no_width_are_absent() {
    let probe = ScriptedProbe {
        fonts: Ok(vec![]),
        ..Default::default()
    };
    assert_eq!(collect_fonts(&probe), "");
}

#[test]
fn font_measurement_failure_is_sentinel() {
    let probe = ScriptedProbe {
        fonts: Err(ProbeError::Unsupported("font metrics")),
        ..Default::default()
    };
    assert_eq!(collect_fonts(&probe), "fonts-error");
}

#[test]
fn font_candidates_are_unique() {
    let mut names = FONT_CANDIDATES.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), FONT_CANDIDATES.len());
}

#[test]
fn signal_kind_display_is_snake_case() {
    assert_eq!(SignalKind::UserAgent.to_string(), "user_agent");
    assert_eq!(SignalKind::Gpu.to_string(), "gpu");
}
