//! Signal collectors.
//!
//! Each collector reads one noisy but mostly stable value from the host and
//! never fails: a probe error becomes a fixed sentinel string so that one
//! missing capability cannot abort fingerprint generation.

use crate::probe::{CanvasOp, EnvironmentProbe};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Drawing script for the rendering-surface probe.
///
/// Must never change once fingerprints are in the field: every edit here
/// changes every device's identity.
pub const CANVAS_SCENE: &[CanvasOp] = &[
    CanvasOp::TextBaseline("top"),
    CanvasOp::Font("14px 'Arial'"),
    CanvasOp::FillStyle("#f60"),
    CanvasOp::FillRect(125.0, 1.0, 62.0, 20.0),
    CanvasOp::FillStyle("#069"),
    CanvasOp::FillText("VidShield fingerprint \u{1f512}", 2.0, 15.0),
    CanvasOp::FillStyle("rgba(102, 204, 0, 0.7)"),
    CanvasOp::FillText("VidShield fingerprint \u{1f512}", 4.0, 17.0),
];

/// Font families probed by the font-availability collector, in output order.
pub const FONT_CANDIDATES: &[&str] = &[
    "Arial",
    "Verdana",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Palatino",
    "Garamond",
    "Bookman",
    "Comic Sans MS",
    "Trebuchet MS",
    "Arial Black",
    "Impact",
];

/// Text measured for each font candidate.
const FONT_SAMPLE: &str = "mmmmmmmmmmlli";

/// Value used when a count or size is not exposed by the host.
const UNKNOWN: &str = "unknown";

/// The signals that feed a fingerprint, in composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Canvas,
    Gpu,
    Screen,
    Timezone,
    Language,
    Platform,
    CpuCores,
    DeviceMemory,
    UserAgent,
    Fonts,
    TouchPoints,
    Plugins,
}

impl SignalKind {
    /// Every kind, in the fixed order the composer consumes them.
    pub const ALL: [SignalKind; 12] = [
        SignalKind::Canvas,
        SignalKind::Gpu,
        SignalKind::Screen,
        SignalKind::Timezone,
        SignalKind::Language,
        SignalKind::Platform,
        SignalKind::CpuCores,
        SignalKind::DeviceMemory,
        SignalKind::UserAgent,
        SignalKind::Fonts,
        SignalKind::TouchPoints,
        SignalKind::Plugins,
    ];

    /// Sentinel substituted when this signal's probe fails.
    #[must_use]
    pub const fn sentinel(self) -> &'static str {
        match self {
            SignalKind::Canvas => "canvas-error",
            SignalKind::Gpu => "webgl-error",
            SignalKind::Screen => "screen-error",
            SignalKind::Timezone => "timezone-error",
            SignalKind::Language => "language-error",
            SignalKind::Platform => "platform-error",
            SignalKind::CpuCores | SignalKind::DeviceMemory => UNKNOWN,
            SignalKind::UserAgent => "useragent-error",
            SignalKind::Fonts => "fonts-error",
            SignalKind::TouchPoints | SignalKind::Plugins => "0",
        }
    }

    /// Runs the collector for this kind.
    pub fn collect<P: EnvironmentProbe + ?Sized>(self, probe: &P) -> Signal {
        let value = match self {
            SignalKind::Canvas => collect_canvas(probe),
            SignalKind::Gpu => collect_gpu(probe),
            SignalKind::Screen => collect_screen(probe),
            SignalKind::Timezone => collect_timezone(probe),
            SignalKind::Language => collect_language(probe),
            SignalKind::Platform => collect_platform(probe),
            SignalKind::CpuCores => collect_cpu_cores(probe),
            SignalKind::DeviceMemory => collect_device_memory(probe),
            SignalKind::UserAgent => collect_user_agent(probe),
            SignalKind::Fonts => collect_fonts(probe),
            SignalKind::TouchPoints => collect_touch_points(probe),
            SignalKind::Plugins => collect_plugins(probe),
        };
        Signal { kind: self, value }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::Canvas => "canvas",
            SignalKind::Gpu => "gpu",
            SignalKind::Screen => "screen",
            SignalKind::Timezone => "timezone",
            SignalKind::Language => "language",
            SignalKind::Platform => "platform",
            SignalKind::CpuCores => "cpu_cores",
            SignalKind::DeviceMemory => "device_memory",
            SignalKind::UserAgent => "user_agent",
            SignalKind::Fonts => "fonts",
            SignalKind::TouchPoints => "touch_points",
            SignalKind::Plugins => "plugins",
        };
        f.write_str(name)
    }
}

/// One string-valued environment measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub value: String,
}

impl Signal {
    /// Creates a signal with an explicit value.
    pub fn new(kind: SignalKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Returns true when this signal carries its kind's failure sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.value == self.kind.sentinel()
    }
}

/// Runs every collector in [`SignalKind::ALL`] order.
pub fn collect_all<P: EnvironmentProbe + ?Sized>(probe: &P) -> Vec<Signal> {
    SignalKind::ALL.iter().map(|kind| kind.collect(probe)).collect()
}

fn substituted(kind: SignalKind, reason: impl fmt::Display) -> String {
    debug!("signal {kind} unavailable, using sentinel: {reason}");
    kind.sentinel().to_string()
}

pub fn collect_canvas<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    probe
        .render_canvas(CANVAS_SCENE)
        .unwrap_or_else(|e| substituted(SignalKind::Canvas, e))
}

/// `vendor~renderer`, or a sentinel when the context or the debug-info
/// extension is missing.
pub fn collect_gpu<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.gpu_descriptor() {
        Ok(Some(gpu)) => format!("{}~{}", gpu.vendor, gpu.renderer),
        Ok(None) => {
            debug!("signal gpu: debug-info extension unavailable");
            "webgl-no-debug-info".to_string()
        }
        Err(e) => substituted(SignalKind::Gpu, e),
    }
}

pub fn collect_screen<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.screen() {
        Ok(s) => format!("{}x{}x{}", s.width, s.height, s.color_depth),
        Err(e) => substituted(SignalKind::Screen, e),
    }
}

pub fn collect_timezone<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    probe
        .timezone()
        .unwrap_or_else(|e| substituted(SignalKind::Timezone, e))
}

pub fn collect_language<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    probe
        .language()
        .unwrap_or_else(|e| substituted(SignalKind::Language, e))
}

pub fn collect_platform<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    probe
        .platform()
        .unwrap_or_else(|e| substituted(SignalKind::Platform, e))
}

pub fn collect_cpu_cores<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.hardware_concurrency() {
        Ok(Some(n)) => n.to_string(),
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => substituted(SignalKind::CpuCores, e),
    }
}

pub fn collect_device_memory<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.device_memory() {
        Ok(Some(gb)) => gb.to_string(),
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => substituted(SignalKind::DeviceMemory, e),
    }
}

pub fn collect_user_agent<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    probe
        .user_agent()
        .unwrap_or_else(|e| substituted(SignalKind::UserAgent, e))
}

/// Comma-joined candidates whose measured width is non-zero.
///
/// This is a heuristic: a fallback font rendered at a non-zero width also
/// counts as present.
pub fn collect_fonts<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    let mut present = Vec::new();
    for font in FONT_CANDIDATES {
        match probe.measure_text(font, FONT_SAMPLE) {
            Ok(width) if width > 0.0 => present.push(*font),
            Ok(_) => {}
            Err(e) => return substituted(SignalKind::Fonts, e),
        }
    }
    present.join(",")
}

pub fn collect_touch_points<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.max_touch_points() {
        Ok(n) => n.unwrap_or(0).to_string(),
        Err(e) => substituted(SignalKind::TouchPoints, e),
    }
}

pub fn collect_plugins<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    match probe.plugin_count() {
        Ok(n) => n.to_string(),
        Err(e) => substituted(SignalKind::Plugins, e),
    }
}
