//! Chalkline Render Library
//!
//! Renderer abstraction and implementations for the Chalkline whiteboard.
//! [`DisplayList`] records backend-agnostic draw operations; the default
//! GPU implementation uses Vello. Exports are encoded with [`encode_png`].

mod display_list;
mod export;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use display_list::{DisplayList, DrawOp, Layer};
pub use export::{EXPORT_PADDING, ExportArea, ExportFrame, encode_png};
pub use renderer::{
    GRID_COLOR, GRID_LINE_WIDTH, MIN_GRID_SPACING, RenderContext, RenderResult, Renderer,
    RendererError,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
