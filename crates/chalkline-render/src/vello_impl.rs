//! Vello-based renderer implementation.

use crate::export::{ExportArea, ExportFrame};
use crate::renderer::{GRID_LINE_WIDTH, RenderContext, Renderer};
use chalkline_core::shapes::{Element, ElementStyle, ElementTrait, Text};
use kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
///
/// Keeps the grid and the elements in separate scenes so a pure edit does not
/// rebuild the grid; [`VelloRenderer::compose`] joins them for presentation.
pub struct VelloRenderer {
    /// Background and grid.
    grid: Scene,
    /// Elements, in paint order.
    scene: Scene,
    /// Font context for text rendering.
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer using the system fonts.
    pub fn new() -> Self {
        Self {
            grid: Scene::new(),
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// The background and grid scene.
    pub fn grid_scene(&self) -> &Scene {
        &self.grid
    }

    /// The element scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the element scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Grid with the elements on top, ready to hand to a `vello::Renderer`.
    pub fn compose(&self) -> Scene {
        let mut out = Scene::new();
        out.append(&self.grid, None);
        out.append(&self.scene, None);
        out
    }

    /// Build a scene for export: committed elements on white, no grid.
    ///
    /// The live scenes are left untouched. Rasterize the result at
    /// `frame.pixel_size()` and hand the pixels to [`crate::encode_png`].
    pub fn build_export_scene(
        &mut self,
        ctx: &RenderContext,
        area: ExportArea,
        scale: f64,
    ) -> Option<(Scene, ExportFrame)> {
        let frame = ctx.export_frame(area, scale)?;
        let live = std::mem::take(&mut self.scene);

        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, Color::WHITE, None, &frame.rect());
        for element in ctx.elements {
            self.render_element(element, frame.transform);
        }

        let export = std::mem::replace(&mut self.scene, live);
        Some((export, frame))
    }

    fn render_element(&mut self, element: &Element, transform: Affine) {
        match element {
            Element::Text(text) => self.render_text(text, transform),
            other => self.render_path(&other.to_path(), other.style(), transform),
        }
    }

    /// Stroke a path with round caps and joins.
    ///
    /// A single-point pen path is a zero-length segment, which round caps turn
    /// into a dot.
    fn render_path(&mut self, path: &BezPath, style: &ElementStyle, transform: Affine) {
        let stroke = Stroke::new(style.stroke_width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        self.scene.stroke(&stroke, transform, style.stroke(), None, path);
    }

    /// Render a text label using Parley, baseline at the anchor.
    fn render_text(&mut self, text: &Text, transform: Affine) {
        if text.text.is_empty() {
            return;
        }

        let brush = Brush::Solid(text.style.stroke());
        let font_size = text.font_size() as f32;

        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, &text.text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(
            "sans-serif".into(),
        )));
        let mut layout = builder.build(&text.text);

        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let text_transform = transform * Affine::translate(text.anchor.to_vec2());

        let mut glyph_count = 0;
        let mut first_baseline = None;

        // Adapted from Parley's vello example
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let baseline = *first_baseline.get_or_insert(glyph_run.baseline());
                let y = glyph_run.baseline() - baseline;
                let run = glyph_run.run();
                let font = run.font();
                let run_font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run_font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No font available: mark where the label would be.
        if glyph_count == 0 {
            log::warn!("No glyphs rendered for label {:?}", text.text);
            self.scene.fill(
                Fill::NonZero,
                transform,
                Color::from_rgba8(255, 100, 100, 100),
                None,
                &text.bounds(),
            );
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_grid(&mut self, ctx: &RenderContext) {
        self.grid.reset();

        let device = ctx.device_transform();
        let viewport = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);
        self.grid
            .fill(Fill::NonZero, device, ctx.background_color, None, &viewport);

        let stroke = Stroke::new(GRID_LINE_WIDTH);
        for line in ctx.grid_lines() {
            self.grid.stroke(&stroke, device, ctx.grid_color, None, &line);
        }
    }

    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        let transform = ctx.view_transform();
        for element in ctx.paint_order() {
            self.render_element(element, transform);
        }
    }
}
