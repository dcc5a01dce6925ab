//! Host capability probes.
//!
//! [`EnvironmentProbe`] is the seam between fingerprinting and whatever
//! platform is running it: a browser through `vidshield-wasm`, the native
//! [`NativeProbe`](crate::NativeProbe), or a scripted probe in tests.
//! Every method may fail; the collectors in [`signals`](crate::signals)
//! turn failures into sentinel values.

use crate::error::ProbeResult;
use serde::{Deserialize, Serialize};

/// One drawing instruction for the offscreen 2-D surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasOp {
    /// Sets the text baseline (`"top"`, `"alphabetic"`, ...).
    TextBaseline(&'static str),
    /// Sets the CSS font shorthand.
    Font(&'static str),
    /// Sets the fill colour.
    FillStyle(&'static str),
    /// Fills a rectangle at `(x, y, width, height)`.
    FillRect(f64, f64, f64, f64),
    /// Draws text at `(x, y)`.
    FillText(&'static str, f64, f64),
}

/// GPU vendor and renderer strings as reported by the debug-info extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuDescriptor {
    /// Unmasked vendor string.
    pub vendor: String,
    /// Unmasked renderer string.
    pub renderer: String,
}

/// Screen width, height and colour depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
}

/// Access to the host environment for fingerprinting.
pub trait EnvironmentProbe {
    /// Replays `scene` onto a fresh offscreen 2-D surface and returns the
    /// serialized pixel buffer (e.g. a data URL).
    fn render_canvas(&self, scene: &[CanvasOp]) -> ProbeResult<String>;

    /// Opens a 3-D context and reads the unmasked GPU strings.
    ///
    /// `Ok(None)` means the context opened but the debug-info extension is
    /// not available.
    fn gpu_descriptor(&self) -> ProbeResult<Option<GpuDescriptor>>;

    /// Screen geometry.
    fn screen(&self) -> ProbeResult<ScreenGeometry>;

    /// IANA timezone name.
    fn timezone(&self) -> ProbeResult<String>;

    /// Active locale tag.
    fn language(&self) -> ProbeResult<String>;

    /// Platform identifier.
    fn platform(&self) -> ProbeResult<String>;

    /// Logical CPU count, `None` when not exposed.
    fn hardware_concurrency(&self) -> ProbeResult<Option<u32>>;

    /// Approximate device memory in GB, `None` when not exposed.
    fn device_memory(&self) -> ProbeResult<Option<f64>>;

    /// Full user-agent string.
    fn user_agent(&self) -> ProbeResult<String>;

    /// Rendered width of `sample` in `font_family`.
    fn measure_text(&self, font_family: &str, sample: &str) -> ProbeResult<f64>;

    /// Maximum simultaneous touch points, `None` when not exposed.
    fn max_touch_points(&self) -> ProbeResult<Option<u32>>;

    /// Number of plugin descriptors the host exposes.
    fn plugin_count(&self) -> ProbeResult<u32>;
}
