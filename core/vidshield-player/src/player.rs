//! The mountable protected player.
//!
//! Mounting wires the watermark engine and the playback guard to a host:
//! it configures the video element, installs the guard's listeners and
//! starts the watermark timer. Everything acquired is owned by the
//! [`MountedPlayer`] and released when it drops.

use crate::config::PlayerConfig;
use crate::error::PlayerResult;
use crate::event::{ContextMenuEvent, EventKind, EventTarget, KeyboardEvent, ListenerSpec};
use crate::guard::{Disposition, FullscreenController, PlaybackGuard};
use crate::host::PlayerHost;
use crate::task::{IntervalTask, ListenerHandle};
use crate::watermark::{
    watermark_text, OverlayStyle, WatermarkData, WatermarkEngine, WatermarkState,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Inputs for mounting a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProps {
    /// Source URL of the protected video.
    #[serde(default)]
    pub video_url: Option<String>,
    /// Identity data rendered into the watermark.
    #[serde(default)]
    pub watermark_data: WatermarkData,
}

impl PlayerProps {
    pub fn new(video_url: impl Into<String>, watermark_data: WatermarkData) -> Self {
        Self {
            video_url: Some(video_url.into()),
            watermark_data,
        }
    }
}

/// A player after mounting.
#[derive(Debug)]
pub enum ProtectedPlayer {
    /// No video source: placeholder shown, nothing installed.
    Placeholder,
    /// Active playback with watermark and guards.
    Mounted(MountedPlayer),
}

impl ProtectedPlayer {
    /// Mounts a player into `host`.
    ///
    /// A missing or blank `video_url` renders the placeholder and installs
    /// no timers or listeners. Otherwise this must run inside a tokio
    /// runtime, which drives the watermark timer.
    pub fn mount(
        props: PlayerProps,
        host: Arc<dyn PlayerHost>,
        config: PlayerConfig,
    ) -> PlayerResult<Self> {
        match props.video_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                MountedPlayer::mount(&url, &props.watermark_data, host, config).map(Self::Mounted)
            }
            None => {
                info!("no video source, showing placeholder");
                host.show_placeholder(&config.placeholder_message);
                Ok(Self::Placeholder)
            }
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    #[must_use]
    pub fn as_mounted(&self) -> Option<&MountedPlayer> {
        match self {
            Self::Mounted(player) => Some(player),
            Self::Placeholder => None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A player with active protection.
///
/// Fields drop in declaration order: the timer stops before listeners are
/// removed.
pub struct MountedPlayer {
    timer: IntervalTask,
    listeners: Vec<ListenerHandle>,
    host: Arc<dyn PlayerHost>,
    guard: PlaybackGuard,
    fullscreen: Arc<FullscreenController>,
    watermark: Arc<Mutex<WatermarkEngine>>,
    config: PlayerConfig,
}

impl MountedPlayer {
    fn mount(
        video_url: &str,
        watermark_data: &WatermarkData,
        host: Arc<dyn PlayerHost>,
        config: PlayerConfig,
    ) -> PlayerResult<Self> {
        let guard = PlaybackGuard::new(config.guards);
        let fullscreen = Arc::new(FullscreenController::new());
        let watermark = Arc::new(Mutex::new(WatermarkEngine::new(
            watermark_text(watermark_data),
            config.max_offset_percent,
        )));

        if let Err(e) = host.configure_video(video_url, &guard.affordances()) {
            warn!("failed to configure video element: {e}");
        }

        let listeners = install_listeners(&host, &guard);

        if guard.config().fullscreen_control {
            fullscreen.sync(host.as_ref());
        }

        host.render_watermark(
            lock(&watermark).state(),
            &OverlayStyle::for_mode(fullscreen.is_fullscreen()),
        );

        // Listeners installed above are released by drop if this fails.
        let timer = {
            let host = Arc::clone(&host);
            let watermark = Arc::clone(&watermark);
            let ui = fullscreen.subscribe();
            IntervalTask::spawn(config.reposition_interval(), move || {
                let state = lock(&watermark).tick().clone();
                let style = OverlayStyle::for_mode(ui.borrow().is_fullscreen);
                host.render_watermark(&state, &style);
            })?
        };

        info!(
            "protected player mounted ({} listeners, reposition every {:?})",
            listeners.len(),
            config.reposition_interval()
        );

        Ok(Self {
            timer,
            listeners,
            host,
            guard,
            fullscreen,
            watermark,
            config,
        })
    }

    /// Handles a context-menu event from the video or its container.
    pub fn on_context_menu(&self, event: &mut ContextMenuEvent) -> Disposition {
        self.guard.handle_context_menu(event)
    }

    /// Handles a document-level key press; shows the notice when the save
    /// shortcut is suppressed.
    pub fn on_keydown(&self, event: &mut KeyboardEvent) -> Disposition {
        let disposition = self.guard.handle_keydown(event);
        if disposition == Disposition::Suppressed {
            self.host.show_notice(&self.config.save_notice);
        }
        disposition
    }

    /// Handles a native fullscreen change, whatever triggered it. Re-renders
    /// the overlay at the new scale when the flag changed.
    pub fn on_fullscreen_change(&self) -> bool {
        if !self.guard.config().fullscreen_control {
            return false;
        }
        let changed = self.fullscreen.sync(self.host.as_ref());
        if changed {
            debug!("fullscreen changed: {}", self.fullscreen.is_fullscreen());
            let state = self.watermark_state();
            let style = OverlayStyle::for_mode(self.fullscreen.is_fullscreen());
            self.host.render_watermark(&state, &style);
        }
        changed
    }

    /// The custom fullscreen button. Only issues a request; the flag follows
    /// the resulting fullscreen-change notification.
    pub async fn toggle_fullscreen(&self) {
        if !self.guard.config().fullscreen_control {
            return;
        }
        self.fullscreen.toggle(self.host.as_ref()).await;
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Snapshot of the overlay state.
    #[must_use]
    pub fn watermark_state(&self) -> WatermarkState {
        lock(&self.watermark).state().clone()
    }

    /// Overlay text for this mount.
    #[must_use]
    pub fn watermark_text(&self) -> String {
        lock(&self.watermark).state().text.clone()
    }

    /// Listeners currently installed.
    #[must_use]
    pub fn listener_specs(&self) -> Vec<ListenerSpec> {
        self.listeners.iter().map(ListenerHandle::spec).collect()
    }

    /// Whether the watermark timer is still running.
    #[must_use]
    pub fn timer_running(&self) -> bool {
        !self.timer.is_finished()
    }

    /// Tears the player down: stops the timer and removes every listener.
    pub fn unmount(self) {
        info!("protected player unmounted");
    }
}

impl std::fmt::Debug for MountedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedPlayer")
            .field("listeners", &self.listeners)
            .field("is_fullscreen", &self.is_fullscreen())
            .field("watermark", &self.watermark_state())
            .finish_non_exhaustive()
    }
}

fn install_listeners(host: &Arc<dyn PlayerHost>, guard: &PlaybackGuard) -> Vec<ListenerHandle> {
    let config = guard.config();
    let mut specs = Vec::with_capacity(4);
    if config.context_menu {
        specs.push(ListenerSpec::new(EventTarget::Video, EventKind::ContextMenu));
        specs.push(ListenerSpec::new(EventTarget::Container, EventKind::ContextMenu));
    }
    if config.save_shortcut {
        specs.push(ListenerSpec::new(EventTarget::Document, EventKind::KeyDown));
    }
    if config.fullscreen_control {
        specs.push(ListenerSpec::new(
            EventTarget::Document,
            EventKind::FullscreenChange,
        ));
    }

    specs
        .into_iter()
        .filter_map(|spec| match ListenerHandle::install(Arc::clone(host), spec) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("failed to install {} listener: {e}", spec.kind.dom_name());
                None
            }
        })
        .collect()
}
