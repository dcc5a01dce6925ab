//! UI events delivered by the host to a mounted player.
//!
//! These mirror the small part of the DOM event model the guard needs:
//! a target, a few modifier flags and a default-prevented bit.

use serde::{Deserialize, Serialize};

/// Element an event fired on or a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    /// The `<video>` element.
    Video,
    /// The element wrapping video, overlay and controls.
    Container,
    /// The whole document.
    Document,
}

/// Kinds of events a player listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ContextMenu,
    KeyDown,
    FullscreenChange,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            EventKind::ContextMenu => "contextmenu",
            EventKind::KeyDown => "keydown",
            EventKind::FullscreenChange => "fullscreenchange",
        }
    }
}

/// A listener registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub target: EventTarget,
    pub kind: EventKind,
}

impl ListenerSpec {
    #[must_use]
    pub const fn new(target: EventTarget, kind: EventKind) -> Self {
        Self { target, kind }
    }
}

/// A context-menu (right click / long press) event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuEvent {
    pub target: EventTarget,
    default_prevented: bool,
}

impl ContextMenuEvent {
    #[must_use]
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The `key` value (`"s"`, `"S"`, `"Escape"`, ...).
    pub key: String,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    default_prevented: bool,
}

impl KeyboardEvent {
    /// A key press with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl_key: false,
            meta_key: false,
            shift_key: false,
            alt_key: false,
            default_prevented: false,
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    /// Ctrl+S or Cmd+S, in either letter case.
    #[must_use]
    pub fn is_save_shortcut(&self) -> bool {
        (self.ctrl_key || self.meta_key) && self.key.eq_ignore_ascii_case("s")
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
