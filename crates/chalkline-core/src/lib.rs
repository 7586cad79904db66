//! Chalkline Core Library
//!
//! Drawing state engine for the Chalkline whiteboard panel: elements,
//! view transform, eraser, undo history, the input state machine and the
//! persistence bridge to the host.

pub mod bridge;
pub mod camera;
pub mod config;
pub mod eraser;
pub mod geometry;
pub mod history;
pub mod host;
pub mod input;
pub mod session;
pub mod shapes;
pub mod state;
pub mod storage;
pub mod tools;

pub use bridge::{
    BridgeError, ClientMessage, DetachedChannel, HostChannel, HostMessage, MemoryChannel,
    Whiteboard,
};
pub use camera::Camera;
pub use config::{PALETTE, SessionConfig};
pub use eraser::Eraser;
pub use history::History;
pub use host::{HostError, HostPanel, STATE_KEY};
pub use input::{InputEvent, Modifiers, Shortcut};
pub use session::{Redraw, Response, Session};
pub use shapes::{Element, ElementId, ElementStyle};
pub use state::WhiteboardState;
pub use tools::{ToolKind, ToolSettings};
