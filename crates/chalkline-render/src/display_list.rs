//! Backend-agnostic recording renderer.
//!
//! Records draw operations instead of rasterizing them. Hosts without a GPU
//! (such as an HTML canvas behind a message channel) replay the operations
//! with their own 2D API.

use crate::export::{ExportArea, ExportFrame};
use crate::renderer::{GRID_LINE_WIDTH, RenderContext, Renderer};
use chalkline_core::shapes::Element;
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use peniko::Color;

/// Which layer an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Background and grid.
    Grid,
    /// Elements.
    Scene,
}

/// One recorded drawing operation.
///
/// Strokes always use round caps and joins.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Fill `rect`, given in the coordinate space `transform` maps from.
    Clear {
        color: Color,
        rect: Rect,
        transform: Affine,
    },
    /// Stroke a path, given in the coordinate space `transform` maps from.
    Stroke {
        path: BezPath,
        transform: Affine,
        color: Color,
        width: f64,
    },
    /// Draw a single-line label with its baseline starting at `origin`.
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        transform: Affine,
        color: Color,
    },
}

/// Display list with one op list per layer.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    grid: Vec<DrawOp>,
    scene: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations of one layer, in paint order.
    pub fn ops(&self, layer: Layer) -> &[DrawOp] {
        match layer {
            Layer::Grid => &self.grid,
            Layer::Scene => &self.scene,
        }
    }

    /// All operations, grid first.
    pub fn iter(&self) -> impl Iterator<Item = &DrawOp> {
        self.grid.iter().chain(self.scene.iter())
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.scene.clear();
    }

    /// Record an export of the committed elements on a white background.
    ///
    /// The live layers are left alone. Returns `None` when
    /// [`RenderContext::export_frame`] does.
    pub fn build_export(
        ctx: &RenderContext,
        area: ExportArea,
        scale: f64,
    ) -> Option<(Vec<DrawOp>, ExportFrame)> {
        let frame = ctx.export_frame(area, scale)?;
        let mut ops = vec![DrawOp::Clear {
            color: Color::WHITE,
            rect: frame.rect(),
            transform: Affine::IDENTITY,
        }];
        ops.extend(ctx.elements.iter().map(|e| element_op(e, frame.transform)));
        Some((ops, frame))
    }
}

fn element_op(element: &Element, transform: Affine) -> DrawOp {
    let style = element.style();
    match element {
        Element::Text(text) => DrawOp::Text {
            text: text.text.clone(),
            origin: text.anchor,
            font_size: text.font_size(),
            transform,
            color: style.stroke(),
        },
        _ => DrawOp::Stroke {
            path: element.to_path(),
            transform,
            color: style.stroke(),
            width: style.stroke_width,
        },
    }
}

impl Renderer for DisplayList {
    fn build_grid(&mut self, ctx: &RenderContext) {
        self.grid.clear();

        let transform = ctx.device_transform();
        self.grid.push(DrawOp::Clear {
            color: ctx.background_color,
            rect: Rect::from_origin_size(Point::ZERO, ctx.viewport_size),
            transform,
        });

        for line in ctx.grid_lines() {
            self.grid.push(DrawOp::Stroke {
                path: line.to_path(0.1),
                transform,
                color: ctx.grid_color,
                width: GRID_LINE_WIDTH,
            });
        }
    }

    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.clear();
        let transform = ctx.view_transform();
        self.scene.extend(ctx.paint_order().map(|e| element_op(e, transform)));
        log::trace!("Recorded {} scene ops", self.scene.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkline_core::input::InputEvent;
    use chalkline_core::session::{Redraw, Session};
    use chalkline_core::tools::ToolKind;
    use kurbo::{PathEl, Size};

    fn stroke_session() -> Session {
        let mut session = Session::default();
        session.select_tool(ToolKind::Line);
        session.handle(InputEvent::PointerDown {
            position: Point::new(10.0, 10.0),
        });
        session.handle(InputEvent::PointerMove {
            position: Point::new(50.0, 10.0),
        });
        session.handle(InputEvent::PointerUp {
            position: Point::new(50.0, 10.0),
        });
        session
    }

    #[test]
    fn test_grid_layer() {
        let session = Session::default();
        let ctx = RenderContext::new(&session, Size::new(40.0, 40.0));
        let mut list = DisplayList::new();
        list.build_grid(&ctx);

        let ops = list.ops(Layer::Grid);
        assert!(matches!(ops[0], DrawOp::Clear { .. }));
        // Two vertical and two horizontal lines at 0 and 20.
        assert_eq!(ops.len(), 5);
        match &ops[1] {
            DrawOp::Stroke { color, width, .. } => {
                assert_eq!(color.to_rgba8().r, 0xdd);
                assert!((width - 1.0).abs() < f64::EPSILON);
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_current_element_painted_last() {
        let mut session = stroke_session();
        session.select_tool(ToolKind::Rectangle);
        session.handle(InputEvent::PointerDown {
            position: Point::new(0.0, 0.0),
        });

        let ctx = RenderContext::new(&session, Size::new(100.0, 100.0));
        let mut list = DisplayList::new();
        list.build_scene(&ctx);

        let ops = list.ops(Layer::Scene);
        assert_eq!(ops.len(), 2);
        match &ops[1] {
            DrawOp::Stroke { path, .. } => {
                let lines = path
                    .elements()
                    .iter()
                    .filter(|el| matches!(el, PathEl::LineTo(_)))
                    .count();
                assert!(lines >= 3);
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_scene_uses_view_transform() {
        let mut session = stroke_session();
        session.handle(InputEvent::ZoomIn);
        let ctx = RenderContext::new(&session, Size::new(100.0, 100.0));
        let mut list = DisplayList::new();
        list.build_scene(&ctx);

        match &list.ops(Layer::Scene)[0] {
            DrawOp::Stroke { transform, width, .. } => {
                let p = *transform * Point::new(10.0, 10.0);
                assert!((p.x - 12.0).abs() < 1e-9);
                let expected = chalkline_core::config::DEFAULT_STROKE_WIDTH;
                assert!((width - expected).abs() < f64::EPSILON);
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_text_op() {
        let mut session = Session::default();
        session.handle(InputEvent::SetStrokeWidth { width: 2.0 });
        session.place_text(Point::new(5.0, 30.0), "hi");
        let ctx = RenderContext::new(&session, Size::new(100.0, 100.0));
        let mut list = DisplayList::new();
        list.build_scene(&ctx);

        match &list.ops(Layer::Scene)[0] {
            DrawOp::Text {
                text, origin, font_size, ..
            } => {
                assert_eq!(text, "hi");
                assert_eq!(*origin, Point::new(5.0, 30.0));
                assert!((font_size - 12.0).abs() < f64::EPSILON);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_covers_scaled_surface() {
        let session = Session::default();
        let ctx = RenderContext::new(&session, Size::new(100.0, 50.0)).with_scale_factor(2.0);
        let mut list = DisplayList::new();
        list.build_grid(&ctx);

        match &list.ops(Layer::Grid)[0] {
            DrawOp::Clear {
                rect, transform, ..
            } => {
                let corner = *transform * Point::new(rect.x1, rect.y1);
                assert_eq!(corner, Point::new(200.0, 100.0));
            }
            other => panic!("expected clear, got {:?}", other),
        }
    }

    #[test]
    fn test_export_skips_grid_and_in_progress_element() {
        let mut session = stroke_session();
        session.select_tool(ToolKind::Rectangle);
        session.handle(InputEvent::PointerDown {
            position: Point::new(0.0, 0.0),
        });
        let ctx = RenderContext::new(&session, Size::new(100.0, 80.0));

        let (ops, frame) = DisplayList::build_export(&ctx, ExportArea::Viewport, 2.0).unwrap();
        assert_eq!(frame.pixel_size(), (200, 160));
        assert_eq!(ops.len(), 2);
        match &ops[0] {
            DrawOp::Clear { color, rect, .. } => {
                assert_eq!(color.to_rgba8().r, 255);
                assert_eq!(color.to_rgba8().b, 255);
                assert_eq!(*rect, Rect::new(0.0, 0.0, 200.0, 160.0));
            }
            other => panic!("expected clear, got {:?}", other),
        }
        match &ops[1] {
            DrawOp::Stroke { transform, .. } => {
                assert_eq!(*transform * Point::new(10.0, 10.0), Point::new(20.0, 20.0));
            }
            other => panic!("expected stroke, got {:?}", other),
        }
    }

    #[test]
    fn test_export_of_empty_board_content() {
        let session = Session::default();
        let ctx = RenderContext::new(&session, Size::new(100.0, 80.0));
        assert!(DisplayList::build_export(&ctx, ExportArea::Content, 1.0).is_none());
    }

    #[test]
    fn test_redraw_levels() {
        let session = stroke_session();
        let ctx = RenderContext::new(&session, Size::new(40.0, 40.0));
        let mut list = DisplayList::new();

        list.redraw(&ctx, Redraw::None);
        assert_eq!(list.iter().count(), 0);

        list.redraw(&ctx, Redraw::Scene);
        assert!(list.ops(Layer::Grid).is_empty());
        assert_eq!(list.ops(Layer::Scene).len(), 1);

        list.redraw(&ctx, Redraw::Full);
        assert!(!list.ops(Layer::Grid).is_empty());
        assert_eq!(list.ops(Layer::Scene).len(), 1);
    }
}
