//! Input events delivered by the host and keyboard shortcut resolution.

use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Everything that can drive a drawing session.
///
/// Pointer positions are in device pixels relative to the drawing surface.
/// Touch input is mapped onto the pointer variants by the host, using the
/// first touch point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// The pointer left the drawing surface. Ends a gesture like `PointerUp`.
    PointerLeave,
    /// Wheel tick. Positive `delta_y` zooms out, anything else zooms in.
    Wheel {
        position: Point,
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Undo,
    Redo,
    Clear,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    SelectTool { tool: ToolKind },
    SetColor { color: String },
    SetStrokeWidth { width: f64 },
    SetTextLabel { text: String },
}

/// Action bound to a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    SelectTool(ToolKind),
}

/// Resolve a key press into a shortcut.
///
/// `key` is the logical key value (e.g. `"z"` or `"Z"`).
pub fn shortcut_for(key: &str, modifiers: Modifiers) -> Option<Shortcut> {
    let mut chars = key.chars();
    let ch = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }

    if modifiers.command() {
        return match (ch, modifiers.shift) {
            ('z', false) => Some(Shortcut::Undo),
            ('z', true) | ('y', _) => Some(Shortcut::Redo),
            _ => None,
        };
    }

    ToolKind::from_shortcut(ch).map(Shortcut::SelectTool)
}
