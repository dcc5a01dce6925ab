//! Watermark overlay engine.
//!
//! The overlay carries the viewer's identity and hops to a new random
//! position on every tick so it cannot be cropped or masked at one fixed
//! spot. Text is fixed for the lifetime of a mount.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::config::DEFAULT_MAX_OFFSET_PERCENT;

/// Placeholder used when the viewer's email is unknown.
pub const NO_EMAIL: &str = "No Email";

/// Placeholder used when the viewer's phone is unknown.
pub const NO_PHONE: &str = "No Phone";

/// Identity data of the viewer, supplied by the session provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkData {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl WatermarkData {
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

fn field_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Builds `"<email> | <phone>"`, substituting placeholders for blank fields.
#[must_use]
pub fn watermark_text(data: &WatermarkData) -> String {
    format!(
        "{} | {}",
        field_or(data.email.as_deref(), NO_EMAIL),
        field_or(data.phone.as_deref(), NO_PHONE)
    )
}

/// Current overlay position and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkState {
    /// Left offset, percent of container width.
    pub position_x: f64,
    /// Top offset, percent of container height.
    pub position_y: f64,
    pub text: String,
}

/// Moves the watermark to a uniformly random position on each tick.
#[derive(Debug)]
pub struct WatermarkEngine<R = StdRng> {
    state: WatermarkState,
    max_offset: f64,
    rng: R,
}

impl WatermarkEngine<StdRng> {
    /// Creates an engine seeded from OS entropy.
    pub fn new(text: impl Into<String>, max_offset_percent: f64) -> Self {
        Self::with_rng(text, max_offset_percent, StdRng::from_entropy())
    }
}

impl<R: Rng> WatermarkEngine<R> {
    /// Creates an engine with a caller-provided RNG and places the label at
    /// its first random position.
    ///
    /// `max_offset_percent` is clamped to `[0, 100]`; non-finite values fall
    /// back to the default bound.
    pub fn with_rng(text: impl Into<String>, max_offset_percent: f64, rng: R) -> Self {
        let max_offset = if max_offset_percent.is_finite() {
            max_offset_percent.clamp(0.0, 100.0)
        } else {
            DEFAULT_MAX_OFFSET_PERCENT
        };
        let mut engine = Self {
            state: WatermarkState {
                position_x: 0.0,
                position_y: 0.0,
                text: text.into(),
            },
            max_offset,
            rng,
        };
        engine.tick();
        engine
    }

    /// Moves to a new random position within `[0, max_offset]` on both axes.
    pub fn tick(&mut self) -> &WatermarkState {
        self.state.position_x = self.rng.gen_range(0.0..=self.max_offset);
        self.state.position_y = self.rng.gen_range(0.0..=self.max_offset);
        &self.state
    }

    #[must_use]
    pub fn state(&self) -> &WatermarkState {
        &self.state
    }

    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }
}

/// CSS `pointer-events` value for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvents {
    None,
    Auto,
}

/// Visual treatment of the overlay.
///
/// The overlay never takes pointer events so the native controls underneath
/// stay usable, and it always sits on top of its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub font_size_px: u16,
    pub padding_px: u16,
    pub opacity: f32,
    pub z_index: i32,
    pub pointer_events: PointerEvents,
}

impl OverlayStyle {
    /// Style for windowed or fullscreen playback. Fullscreen uses a larger
    /// font and padding so the label stays legible.
    #[must_use]
    pub fn for_mode(fullscreen: bool) -> Self {
        let (font_size_px, padding_px) = if fullscreen { (24, 10) } else { (14, 6) };
        Self {
            font_size_px,
            padding_px,
            opacity: 0.5,
            z_index: i32::MAX,
            pointer_events: PointerEvents::None,
        }
    }

    /// Inline CSS placing the overlay at `state`'s position.
    #[must_use]
    pub fn css(&self, state: &WatermarkState) -> String {
        let mut css = String::with_capacity(192);
        let pointer = match self.pointer_events {
            PointerEvents::None => "none",
            PointerEvents::Auto => "auto",
        };
        // Writing into a String cannot fail.
        let _ = write!(
            css,
            "position:absolute;left:{:.2}%;top:{:.2}%;font-size:{}px;padding:{}px;\
             opacity:{};z-index:{};pointer-events:{};user-select:none;white-space:nowrap;",
            state.position_x,
            state.position_y,
            self.font_size_px,
            self.padding_px,
            self.opacity,
            self.z_index,
            pointer,
        );
        css
    }
}
