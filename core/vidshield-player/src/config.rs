//! Player configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default watermark reposition period.
pub const DEFAULT_REPOSITION_INTERVAL_MS: u64 = 2500;

/// Shortest reposition period accepted; smaller values are raised to this.
pub const MIN_REPOSITION_INTERVAL_MS: u64 = 100;

/// Default upper bound for watermark offsets, in percent of the container.
pub const DEFAULT_MAX_OFFSET_PERCENT: f64 = 70.0;

/// Which playback restrictions are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Suppress the context menu on the video and its container.
    pub context_menu: bool,
    /// Suppress Ctrl/Cmd+S at document level.
    pub save_shortcut: bool,
    /// Hide download, picture-in-picture and remote playback.
    pub native_affordances: bool,
    /// Offer the custom fullscreen control and track fullscreen changes.
    pub fullscreen_control: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            context_menu: true,
            save_shortcut: true,
            native_affordances: true,
            fullscreen_control: true,
        }
    }
}

/// Configuration for a protected player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Watermark reposition period (ms).
    pub reposition_interval_ms: u64,
    /// Upper bound for both watermark coordinates (percent).
    pub max_offset_percent: f64,
    /// Active guards.
    pub guards: GuardConfig,
    /// Notice shown when the save shortcut is suppressed.
    pub save_notice: String,
    /// Message shown when there is no video to play.
    pub placeholder_message: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            reposition_interval_ms: DEFAULT_REPOSITION_INTERVAL_MS,
            max_offset_percent: DEFAULT_MAX_OFFSET_PERCENT,
            guards: GuardConfig::default(),
            save_notice: "Saving this video is not allowed.".to_string(),
            placeholder_message: "No video available".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Reposition period, floored at [`MIN_REPOSITION_INTERVAL_MS`].
    #[must_use]
    pub fn reposition_interval(&self) -> Duration {
        Duration::from_millis(self.reposition_interval_ms.max(MIN_REPOSITION_INTERVAL_MS))
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> crate::PlayerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
