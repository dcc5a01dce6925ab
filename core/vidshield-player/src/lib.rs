//! Protected video playback for VidShield.
//!
//! A mounted player overlays a moving, identity-bearing watermark on the
//! video and applies a set of playback guards that make casual saving
//! harder. It is not DRM: the goal is friction and traceability.
//!
//! # Components
//!
//! - **Watermark**: label text built once per mount from the viewer's
//!   email and phone, repositioned at random on a fixed interval
//! - **Guard**: context-menu and save-shortcut suppression, disabled native
//!   download / picture-in-picture / casting, custom fullscreen control
//! - **Host**: the platform seam ([`PlayerHost`]) that renders and delivers
//!   events
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vidshield_player::{PlayerConfig, PlayerHost, PlayerProps, ProtectedPlayer, WatermarkData};
//!
//! # async fn run(host: Arc<dyn PlayerHost>) -> vidshield_player::PlayerResult<()> {
//! let props = PlayerProps::new(
//!     "https://cdn.example.com/course/intro.m3u8",
//!     WatermarkData::default().with_email("student@example.com"),
//! );
//! let player = ProtectedPlayer::mount(props, host, PlayerConfig::default())?;
//! # drop(player);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod event;
mod guard;
mod host;
mod player;
mod task;
mod watermark;

pub use config::{
    GuardConfig, PlayerConfig, DEFAULT_MAX_OFFSET_PERCENT, DEFAULT_REPOSITION_INTERVAL_MS,
    MIN_REPOSITION_INTERVAL_MS,
};
pub use error::{HostError, HostResult, PlayerError, PlayerResult};
pub use event::{ContextMenuEvent, EventKind, EventTarget, KeyboardEvent, ListenerSpec};
pub use guard::{
    Disposition, FullscreenController, NativeAffordances, PlaybackGuard, PlaybackUiState,
};
pub use host::{ListenerId, PlayerHost};
pub use player::{MountedPlayer, PlayerProps, ProtectedPlayer};
pub use task::{IntervalTask, ListenerHandle};
pub use watermark::{
    watermark_text, OverlayStyle, PointerEvents, WatermarkData, WatermarkEngine, WatermarkState,
    NO_EMAIL, NO_PHONE,
};
