//! Text label.

use super::{ElementId, ElementStyle, ElementTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.6;
/// Portion of the font size hanging below the baseline.
const DESCENT_FACTOR: f64 = 0.2;

/// A single-line text label.
///
/// The anchor is the left end of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Baseline origin.
    #[serde(flatten)]
    pub anchor: Point,
    /// The label. Missing in some older records.
    #[serde(default)]
    pub text: String,
    /// Style properties. The stroke width drives the font size.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Text {
    /// Smallest font size a label is drawn at.
    pub const MIN_FONT_SIZE: f64 = 12.0;

    pub fn new(id: ElementId, anchor: Point, text: impl Into<String>, style: ElementStyle) -> Self {
        Self {
            id,
            anchor,
            text: text.into(),
            style,
        }
    }

    /// Font size in model units.
    pub fn font_size(&self) -> f64 {
        (self.style.stroke_width * 4.0).max(Self::MIN_FONT_SIZE)
    }

    /// Approximate advance width of the label.
    fn approximate_width(&self) -> f64 {
        self.text.chars().count() as f64 * self.font_size() * CHAR_WIDTH_FACTOR
    }
}

impl ElementTrait for Text {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let size = self.font_size();
        Rect::new(
            self.anchor.x,
            self.anchor.y - size,
            self.anchor.x + self.approximate_width(),
            self.anchor.y + size * DESCENT_FACTOR,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let margin = tolerance + self.style.stroke_width / 2.0;
        let b = self.bounds().inflate(margin, margin);
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Glyphs are laid out by the renderer, so there is no outline path.
    fn to_path(&self) -> BezPath {
        BezPath::new()
    }

    fn drag_to(&mut self, _point: Point) {}

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}
