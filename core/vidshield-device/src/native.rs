//! Environment probe for native (non-browser) hosts.
//!
//! There is no rendering surface, GPU context, screen or font probe outside
//! a browser, so those signals fall back to their sentinels. The remaining
//! values come from the OS.

use crate::error::{ProbeError, ProbeResult};
use crate::probe::{CanvasOp, EnvironmentProbe, GpuDescriptor, ScreenGeometry};
use std::env;

/// Probe backed by process environment and OS facts.
#[derive(Debug, Clone, Default)]
pub struct NativeProbe {
    _private: (),
}

impl NativeProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// First non-empty value among the given environment variables.
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

/// Turns a POSIX locale (`en_US.UTF-8`) into a language tag (`en-US`).
fn locale_to_tag(locale: &str) -> String {
    let base = locale.split(['.', '@']).next().unwrap_or(locale);
    base.replace('_', "-")
}

impl EnvironmentProbe for NativeProbe {
    fn render_canvas(&self, _scene: &[CanvasOp]) -> ProbeResult<String> {
        Err(ProbeError::Unsupported("2d canvas"))
    }

    fn gpu_descriptor(&self) -> ProbeResult<Option<GpuDescriptor>> {
        Err(ProbeError::Unsupported("webgl"))
    }

    fn screen(&self) -> ProbeResult<ScreenGeometry> {
        Err(ProbeError::Unsupported("screen"))
    }

    fn timezone(&self) -> ProbeResult<String> {
        first_env(&["TZ"])
            .map(|tz| tz.trim_start_matches(':').to_string())
            .ok_or(ProbeError::Unsupported("timezone"))
    }

    fn language(&self) -> ProbeResult<String> {
        first_env(&["LC_ALL", "LANG"])
            .map(|l| locale_to_tag(&l))
            .ok_or(ProbeError::Unsupported("language"))
    }

    fn platform(&self) -> ProbeResult<String> {
        Ok(format!("{}-{}", env::consts::OS, env::consts::ARCH))
    }

    fn hardware_concurrency(&self) -> ProbeResult<Option<u32>> {
        Ok(std::thread::available_parallelism()
            .ok()
            .and_then(|n| u32::try_from(n.get()).ok()))
    }

    fn device_memory(&self) -> ProbeResult<Option<f64>> {
        Ok(None)
    }

    fn user_agent(&self) -> ProbeResult<String> {
        Ok(format!(
            "vidshield/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            env::consts::OS,
            get_hostname()
        ))
    }

    fn measure_text(&self, _font_family: &str, _sample: &str) -> ProbeResult<f64> {
        Err(ProbeError::Unsupported("font metrics"))
    }

    fn max_touch_points(&self) -> ProbeResult<Option<u32>> {
        Ok(None)
    }

    fn plugin_count(&self) -> ProbeResult<u32> {
        Ok(0)
    }
}
