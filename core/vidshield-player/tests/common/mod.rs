//! Shared test helpers for player tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vidshield_player::{
    EventKind, HostError, HostResult, ListenerId, ListenerSpec, NativeAffordances, OverlayStyle,
    PlayerHost, WatermarkState,
};

pub const VIDEO_URL: &str = "https://cdn.example.com/courses/rust-101/lesson-1.mp4";

/// Everything the host was asked to do.
#[derive(Debug, Default, Clone)]
pub struct HostLog {
    pub placeholders: Vec<String>,
    pub configured: Vec<(String, NativeAffordances)>,
    pub active: BTreeMap<ListenerId, ListenerSpec>,
    pub added: usize,
    pub removed: Vec<ListenerId>,
    pub renders: Vec<(WatermarkState, OverlayStyle)>,
    pub notices: Vec<String>,
}

/// A host double that records calls and simulates fullscreen.
#[derive(Debug, Default)]
pub struct RecordingHost {
    log: Mutex<HostLog>,
    next_id: AtomicU64,
    fullscreen: AtomicBool,
    pub reject_fullscreen: AtomicBool,
    pub fail_configure: AtomicBool,
    pub fail_listener: Mutex<Option<EventKind>>,
    pub fullscreen_requests: AtomicUsize,
    pub exit_requests: AtomicUsize,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn log(&self) -> HostLog {
        self.log.lock().unwrap().clone()
    }

    pub fn render_count(&self) -> usize {
        self.log.lock().unwrap().renders.len()
    }

    pub fn last_render(&self) -> Option<(WatermarkState, OverlayStyle)> {
        self.log.lock().unwrap().renders.last().cloned()
    }

    /// Simulates the browser entering or leaving fullscreen on its own.
    pub fn set_fullscreen(&self, on: bool) {
        self.fullscreen.store(on, Ordering::SeqCst);
    }

    pub fn fail_listener_kind(&self, kind: EventKind) {
        *self.fail_listener.lock().unwrap() = Some(kind);
    }
}

#[async_trait]
impl PlayerHost for RecordingHost {
    fn show_placeholder(&self, message: &str) {
        self.log.lock().unwrap().placeholders.push(message.to_string());
    }

    fn configure_video(
        &self,
        source_url: &str,
        affordances: &NativeAffordances,
    ) -> HostResult<()> {
        if self.fail_configure.load(Ordering::SeqCst) {
            return Err(HostError::Failed("video element missing".into()));
        }
        self.log
            .lock()
            .unwrap()
            .configured
            .push((source_url.to_string(), *affordances));
        Ok(())
    }

    fn add_listener(&self, spec: ListenerSpec) -> HostResult<ListenerId> {
        if *self.fail_listener.lock().unwrap() == Some(spec.kind) {
            return Err(HostError::Unsupported("listener"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut log = self.log.lock().unwrap();
        log.active.insert(id, spec);
        log.added += 1;
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut log = self.log.lock().unwrap();
        log.active.remove(&id);
        log.removed.push(id);
    }

    fn render_watermark(&self, state: &WatermarkState, style: &OverlayStyle) {
        self.log
            .lock()
            .unwrap()
            .renders
            .push((state.clone(), *style));
    }

    fn show_notice(&self, message: &str) {
        self.log.lock().unwrap().notices.push(message.to_string());
    }

    fn fullscreen_element_present(&self) -> bool {
        self.fullscreen.load(Ordering::SeqCst)
    }

    async fn request_fullscreen(&self) -> HostResult<()> {
        self.fullscreen_requests.fetch_add(1, Ordering::SeqCst);
        if self.reject_fullscreen.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("permission denied".into()));
        }
        Ok(())
    }

    async fn exit_fullscreen(&self) -> HostResult<()> {
        self.exit_requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Clones the concrete host into the trait object the player takes.
pub fn as_host(host: &Arc<RecordingHost>) -> Arc<dyn PlayerHost> {
    Arc::clone(host) as Arc<dyn PlayerHost>
}
