//! Playback guard.
//!
//! Raises the cost of casually saving a protected video: the context menu
//! and the save shortcut are swallowed, the native download,
//! picture-in-picture and casting affordances are switched off, and
//! fullscreen goes through a custom control. Each restriction is toggled and
//! fails independently of the others.

use crate::config::GuardConfig;
use crate::event::{ContextMenuEvent, EventTarget, KeyboardEvent};
use crate::host::PlayerHost;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

/// What a guard handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The default action was prevented.
    Suppressed,
    /// The event was left alone.
    PassThrough,
}

/// Native `<video>` affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeAffordances {
    pub allow_download: bool,
    pub allow_picture_in_picture: bool,
    pub allow_remote_playback: bool,
}

impl NativeAffordances {
    /// Download, picture-in-picture and remote playback all disabled.
    #[must_use]
    pub const fn locked_down() -> Self {
        Self {
            allow_download: false,
            allow_picture_in_picture: false,
            allow_remote_playback: false,
        }
    }

    /// The browser's defaults.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            allow_download: true,
            allow_picture_in_picture: true,
            allow_remote_playback: true,
        }
    }

    /// Value for the `controlsList` attribute, if any.
    #[must_use]
    pub fn controls_list(&self) -> Option<&'static str> {
        (!self.allow_download).then_some("nodownload")
    }

    /// Attributes to set on the video element, as `(name, value)` pairs.
    #[must_use]
    pub fn video_attributes(&self) -> Vec<(&'static str, &'static str)> {
        let mut attrs = Vec::with_capacity(3);
        if let Some(list) = self.controls_list() {
            attrs.push(("controlslist", list));
        }
        if !self.allow_picture_in_picture {
            attrs.push(("disablepictureinpicture", "true"));
        }
        if !self.allow_remote_playback {
            attrs.push(("disableremoteplayback", "true"));
        }
        attrs
    }
}

/// Event handlers for the context menu and save shortcut.
#[derive(Debug, Clone)]
pub struct PlaybackGuard {
    config: GuardConfig,
}

impl PlaybackGuard {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Affordances the video element should be configured with.
    #[must_use]
    pub fn affordances(&self) -> NativeAffordances {
        if self.config.native_affordances {
            NativeAffordances::locked_down()
        } else {
            NativeAffordances::permissive()
        }
    }

    /// Suppresses the context menu on the video surface and its container.
    pub fn handle_context_menu(&self, event: &mut ContextMenuEvent) -> Disposition {
        if !self.config.context_menu {
            return Disposition::PassThrough;
        }
        match event.target {
            EventTarget::Video | EventTarget::Container => {
                event.prevent_default();
                debug!("context menu suppressed on {:?}", event.target);
                Disposition::Suppressed
            }
            EventTarget::Document => Disposition::PassThrough,
        }
    }

    /// Suppresses Ctrl/Cmd+S. Other keys pass through untouched.
    pub fn handle_keydown(&self, event: &mut KeyboardEvent) -> Disposition {
        if !self.config.save_shortcut || !event.is_save_shortcut() {
            return Disposition::PassThrough;
        }
        event.prevent_default();
        debug!("save shortcut suppressed");
        Disposition::Suppressed
    }
}

/// UI state shared between the fullscreen listener and the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackUiState {
    pub is_fullscreen: bool,
}

/// Custom fullscreen control.
///
/// `is_fullscreen` has a single writer, [`sync`](Self::sync), fed by the
/// host's fullscreen-change notifications. [`toggle`](Self::toggle) only
/// issues requests, so user- and browser-initiated changes (e.g. Escape)
/// cannot diverge.
#[derive(Debug)]
pub struct FullscreenController {
    state: watch::Sender<PlaybackUiState>,
}

impl Default for FullscreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl FullscreenController {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(PlaybackUiState::default());
        Self { state }
    }

    /// Current fullscreen flag.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.state.borrow().is_fullscreen
    }

    /// Receiver observing the UI state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackUiState> {
        self.state.subscribe()
    }

    /// Asks the host to enter or leave fullscreen. A rejected request is
    /// logged and otherwise ignored.
    pub async fn toggle(&self, host: &dyn PlayerHost) {
        let result = if self.is_fullscreen() {
            host.exit_fullscreen().await
        } else {
            host.request_fullscreen().await
        };
        if let Err(e) = result {
            warn!("fullscreen request failed: {e}");
        }
    }

    /// Re-reads the host's fullscreen element and updates the flag.
    /// Returns true when the flag changed.
    pub fn sync(&self, host: &dyn PlayerHost) -> bool {
        let now = host.fullscreen_element_present();
        self.state.send_if_modified(|state| {
            if state.is_fullscreen == now {
                false
            } else {
                state.is_fullscreen = now;
                true
            }
        })
    }
}
