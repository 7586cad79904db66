//! Renderer trait abstraction.

use chalkline_core::Camera;
use chalkline_core::config::GRID_SIZE;
use chalkline_core::session::{Redraw, Session};
use chalkline_core::shapes::Element;
use kurbo::{Affine, Line, Point, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid line color (`#ddd`).
pub const GRID_COLOR: Color = Color::from_rgb8(0xdd, 0xdd, 0xdd);

/// Grid line width in device pixels.
pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Grids denser than this many device pixels per cell are not drawn.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Committed elements in paint order.
    pub elements: &'a [Element],
    /// Element being drawn; always painted last.
    pub current_element: Option<&'a Element>,
    /// View transform.
    pub camera: &'a Camera,
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Grid line color.
    pub grid_color: Color,
    /// Model units between grid lines.
    pub grid_size: f64,
    /// Whether to draw the grid at all.
    pub show_grid: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a render context for a session.
    pub fn new(session: &'a Session, viewport_size: Size) -> Self {
        Self::from_parts(
            session.elements(),
            session.current_element(),
            session.camera(),
            viewport_size,
        )
        .with_grid_size(session.config().grid_size)
    }

    /// Create a render context from loose parts.
    pub fn from_parts(
        elements: &'a [Element],
        current_element: Option<&'a Element>,
        camera: &'a Camera,
        viewport_size: Size,
    ) -> Self {
        Self {
            elements,
            current_element,
            camera,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            grid_color: GRID_COLOR,
            grid_size: GRID_SIZE,
            show_grid: true,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = color;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Show or hide the grid.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Logical pixels to physical pixels.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Model coordinates to physical pixels.
    pub fn view_transform(&self) -> Affine {
        self.device_transform() * self.camera.transform()
    }

    /// Elements in paint order: committed ones first, the one being drawn last.
    pub fn paint_order(&self) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().chain(self.current_element)
    }

    /// Grid lines in logical pixels, vertical lines first.
    ///
    /// Lines start at `offset mod spacing` on each axis so the grid follows
    /// panning continuously.
    pub fn grid_lines(&self) -> Vec<Line> {
        let spacing = self.camera.grid_spacing(self.grid_size);
        if !self.show_grid
            || !spacing.is_finite()
            || spacing * self.scale_factor < MIN_GRID_SPACING
        {
            return Vec::new();
        }

        let origin = self.camera.grid_origin(self.grid_size);
        let Size { width, height } = self.viewport_size;
        let mut lines = Vec::new();

        let mut x = origin.x;
        while x < width {
            lines.push(Line::new(Point::new(x, 0.0), Point::new(x, height)));
            x += spacing;
        }
        let mut y = origin.y;
        while y < height {
            lines.push(Line::new(Point::new(0.0, y), Point::new(width, y)));
            y += spacing;
        }
        lines
    }
}

/// Trait for rendering backends.
///
/// The grid and the elements are separate layers: the grid only changes with
/// the view, the elements change with every edit.
pub trait Renderer: Send + Sync {
    /// Rebuild the background and grid layer.
    fn build_grid(&mut self, ctx: &RenderContext);

    /// Rebuild the element layer.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Rebuild whatever a session response asked for.
    fn redraw(&mut self, ctx: &RenderContext, redraw: Redraw) {
        match redraw {
            Redraw::None => {}
            Redraw::Scene => self.build_scene(ctx),
            Redraw::Full => {
                self.build_grid(ctx);
                self.build_scene(ctx);
            }
        }
    }

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
