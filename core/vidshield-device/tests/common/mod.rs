//! Shared test helpers for device identity tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use vidshield_device::{
    CanvasOp, DeviceError, DeviceResult, EnvironmentProbe, GpuDescriptor, KeyValueStore,
    ProbeError, ProbeResult, ScreenGeometry,
};

/// A probe with fixed answers; individual capabilities can be made to fail.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    pub canvas: ProbeResult<String>,
    pub gpu: ProbeResult<Option<GpuDescriptor>>,
    pub screen: ProbeResult<ScreenGeometry>,
    pub timezone: ProbeResult<String>,
    pub language: ProbeResult<String>,
    pub platform: ProbeResult<String>,
    pub cpu: ProbeResult<Option<u32>>,
    pub memory: ProbeResult<Option<f64>>,
    pub user_agent: ProbeResult<String>,
    /// Fonts that measure wider than zero; all others measure 0.
    pub fonts: ProbeResult<Vec<&'static str>>,
    pub touch: ProbeResult<Option<u32>>,
    pub plugins: ProbeResult<u32>,
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self {
            canvas: Ok("data:image/png;base64,AAAA".into()),
            gpu: Ok(Some(GpuDescriptor {
                vendor: "Intel Inc.".into(),
                renderer: "Intel Iris OpenGL Engine".into(),
            })),
            screen: Ok(ScreenGeometry {
                width: 1920,
                height: 1080,
                color_depth: 24,
            }),
            timezone: Ok("Europe/Berlin".into()),
            language: Ok("de-DE".into()),
            platform: Ok("MacIntel".into()),
            cpu: Ok(Some(8)),
            memory: Ok(Some(8.0)),
            user_agent: Ok("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)".into()),
            fonts: Ok(vec!["Arial", "Georgia"]),
            touch: Ok(None),
            plugins: Ok(5),
        }
    }
}

impl ScriptedProbe {
    /// A probe where every capability fails.
    pub fn all_failing() -> Self {
        let blocked = || ProbeError::Blocked("denied".into());
        Self {
            canvas: Err(blocked()),
            gpu: Err(blocked()),
            screen: Err(blocked()),
            timezone: Err(blocked()),
            language: Err(blocked()),
            platform: Err(blocked()),
            cpu: Err(blocked()),
            memory: Err(blocked()),
            user_agent: Err(blocked()),
            fonts: Err(blocked()),
            touch: Err(blocked()),
            plugins: Err(blocked()),
        }
    }
}

impl EnvironmentProbe for ScriptedProbe {
    fn render_canvas(&self, scene: &[CanvasOp]) -> ProbeResult<String> {
        assert!(!scene.is_empty());
        self.canvas.clone()
    }

    fn gpu_descriptor(&self) -> ProbeResult<Option<GpuDescriptor>> {
        self.gpu.clone()
    }

    fn screen(&self) -> ProbeResult<ScreenGeometry> {
        self.screen.clone()
    }

    fn timezone(&self) -> ProbeResult<String> {
        self.timezone.clone()
    }

    fn language(&self) -> ProbeResult<String> {
        self.language.clone()
    }

    fn platform(&self) -> ProbeResult<String> {
        self.platform.clone()
    }

    fn hardware_concurrency(&self) -> ProbeResult<Option<u32>> {
        self.cpu.clone()
    }

    fn device_memory(&self) -> ProbeResult<Option<f64>> {
        self.memory.clone()
    }

    fn user_agent(&self) -> ProbeResult<String> {
        self.user_agent.clone()
    }

    fn measure_text(&self, font_family: &str, _sample: &str) -> ProbeResult<f64> {
        let present = self.fonts.clone()?;
        Ok(if present.contains(&font_family) { 112.5 } else { 0.0 })
    }

    fn max_touch_points(&self) -> ProbeResult<Option<u32>> {
        self.touch.clone()
    }

    fn plugin_count(&self) -> ProbeResult<u32> {
        self.plugins.clone()
    }
}

/// One call observed by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Get(String),
    Set(String, String),
    Remove(String),
}

/// In-memory storage that records every call, with optional failures.
#[derive(Debug, Default)]
pub struct RecordingStore {
    entries: RefCell<BTreeMap<String, String>>,
    ops: RefCell<Vec<StoreOp>>,
    pub fail_get: bool,
    pub fail_set: bool,
    pub fail_remove: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.ops
            .borrow()
            .iter()
            .filter(|op| matches!(op, StoreOp::Set(..)))
            .count()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> DeviceResult<Option<String>> {
        self.ops.borrow_mut().push(StoreOp::Get(key.to_string()));
        if self.fail_get {
            return Err(DeviceError::Storage("read refused".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DeviceResult<()> {
        self.ops
            .borrow_mut()
            .push(StoreOp::Set(key.to_string(), value.to_string()));
        if self.fail_set {
            return Err(DeviceError::Storage("quota exceeded".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DeviceResult<()> {
        self.ops.borrow_mut().push(StoreOp::Remove(key.to_string()));
        if self.fail_remove {
            return Err(DeviceError::Storage("remove refused".into()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
