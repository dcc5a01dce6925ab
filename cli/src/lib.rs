//! Shared pieces of the `vidshield` command-line tool.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info};
use vidshield_device::{DeviceIdentityStore, FileStore, IdentityConfig, NativeProbe};
use vidshield_player::{
    HostResult, ListenerId, ListenerSpec, NativeAffordances, OverlayStyle, PlayerConfig,
    PlayerHost, PlayerProps, ProtectedPlayer, WatermarkData, WatermarkState,
};

/// Source URL used when previewing the overlay without a real video.
pub const PREVIEW_VIDEO_URL: &str = "preview://vidshield";

/// Settings file accepted by `--config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VidshieldConfig {
    pub identity: IdentityConfig,
    pub player: PlayerConfig,
}

impl VidshieldConfig {
    /// Loads the settings file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

/// Identity store backed by the native probe and a JSON file.
pub type NativeIdentityStore = DeviceIdentityStore<FileStore, NativeProbe>;

/// Opens the identity store at `path`, or at the platform data directory.
pub fn open_identity_store(
    path: Option<PathBuf>,
    config: IdentityConfig,
) -> Result<NativeIdentityStore> {
    let storage = match path {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location().context("failed to locate identity store")?,
    };
    debug!("identity store at {}", storage.path().display());
    Ok(DeviceIdentityStore::with_config(storage, NativeProbe::new(), config))
}

/// One overlay render observed by [`ConsoleHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub state: WatermarkState,
    pub style: OverlayStyle,
}

/// A headless [`PlayerHost`] that forwards overlay renders to a channel.
///
/// Fullscreen is simulated: requests are granted immediately and the
/// player learns about them through `on_fullscreen_change`.
#[derive(Debug)]
pub struct ConsoleHost {
    renders: mpsc::UnboundedSender<Render>,
    fullscreen: AtomicBool,
    next_listener: AtomicU64,
}

impl ConsoleHost {
    pub fn new(fullscreen: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<Render>) {
        let (renders, rx) = mpsc::unbounded_channel();
        let host = Arc::new(Self {
            renders,
            fullscreen: AtomicBool::new(fullscreen),
            next_listener: AtomicU64::new(1),
        });
        (host, rx)
    }
}

#[async_trait]
impl PlayerHost for ConsoleHost {
    fn show_placeholder(&self, message: &str) {
        info!("placeholder: {message}");
    }

    fn configure_video(
        &self,
        source_url: &str,
        affordances: &NativeAffordances,
    ) -> HostResult<()> {
        debug!("video {source_url} attributes {:?}", affordances.video_attributes());
        Ok(())
    }

    fn add_listener(&self, spec: ListenerSpec) -> HostResult<ListenerId> {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        debug!("listener {id} on {:?} for {}", spec.target, spec.kind.dom_name());
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        debug!("listener {id} released");
    }

    fn render_watermark(&self, state: &WatermarkState, style: &OverlayStyle) {
        // The receiver is gone once the preview has what it asked for.
        let _ = self.renders.send(Render {
            state: state.clone(),
            style: *style,
        });
    }

    fn show_notice(&self, message: &str) {
        info!("notice: {message}");
    }

    fn fullscreen_element_present(&self) -> bool {
        self.fullscreen.load(Ordering::Relaxed)
    }

    async fn request_fullscreen(&self) -> HostResult<()> {
        self.fullscreen.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn exit_fullscreen(&self) -> HostResult<()> {
        self.fullscreen.store(false, Ordering::Relaxed);
        Ok(())
    }
}

/// Mounts a player against a [`ConsoleHost`] and collects the initial
/// render plus `ticks` repositioning renders, calling `on_render` for each
/// as it arrives.
pub async fn preview_watermark<F>(
    data: WatermarkData,
    config: PlayerConfig,
    ticks: usize,
    fullscreen: bool,
    mut on_render: F,
) -> Result<Vec<Render>>
where
    F: FnMut(usize, &Render),
{
    let (host, mut rx) = ConsoleHost::new(fullscreen);
    let props = PlayerProps::new(PREVIEW_VIDEO_URL, data);
    let player = ProtectedPlayer::mount(props, host, config).context("failed to mount player")?;

    let mut renders = Vec::with_capacity(ticks + 1);
    while renders.len() <= ticks {
        let Some(render) = rx.recv().await else {
            break;
        };
        on_render(renders.len(), &render);
        renders.push(render);
    }

    if let ProtectedPlayer::Mounted(mounted) = player {
        mounted.unmount();
    }
    Ok(renders)
}
