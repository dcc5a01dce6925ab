//! Host abstraction.
//!
//! Defines the operations a mounted player needs from the platform that
//! renders it (a browser DOM, a test double, a headless preview), so the
//! watermark and guard logic stays free of rendering concerns.

use crate::error::HostResult;
use crate::event::ListenerSpec;
use crate::guard::NativeAffordances;
use crate::watermark::{OverlayStyle, WatermarkState};
use async_trait::async_trait;

/// Identifier the host hands out for an installed listener.
pub type ListenerId = u64;

/// The platform a protected player is mounted into.
#[async_trait]
pub trait PlayerHost: Send + Sync {
    /// Renders the "no video available" state.
    fn show_placeholder(&self, message: &str);

    /// Points the video element at `source_url` and applies `affordances`.
    fn configure_video(
        &self,
        source_url: &str,
        affordances: &NativeAffordances,
    ) -> HostResult<()>;

    /// Installs a listener that forwards matching events to the player.
    fn add_listener(&self, spec: ListenerSpec) -> HostResult<ListenerId>;

    /// Removes a previously installed listener.
    fn remove_listener(&self, id: ListenerId);

    /// Draws the watermark overlay.
    fn render_watermark(&self, state: &WatermarkState, style: &OverlayStyle);

    /// Shows a short user-facing notice.
    fn show_notice(&self, message: &str);

    /// Whether the document currently has a fullscreen element.
    fn fullscreen_element_present(&self) -> bool;

    /// Requests fullscreen on the player container.
    async fn request_fullscreen(&self) -> HostResult<()>;

    /// Leaves fullscreen.
    async fn exit_fullscreen(&self) -> HostResult<()>;
}
