//! Circle shape.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::geometry::point_near_circle_outline;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle centered on the anchor.
///
/// The radius is half the length of the drag vector `(width, height)`, so the
/// anchor stays the center while dragging rather than a bounding-box corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ElementId,
    /// Center point.
    #[serde(flatten)]
    pub anchor: Point,
    /// Horizontal component of the drag vector.
    pub width: f64,
    /// Vertical component of the drag vector.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Circle {
    /// Create a zero-radius circle at `anchor`.
    pub fn new(id: ElementId, anchor: Point, style: ElementStyle) -> Self {
        Self {
            id,
            anchor,
            width: 0.0,
            height: 0.0,
            style,
        }
    }

    /// Radius derived from the drag vector.
    pub fn radius(&self) -> f64 {
        self.width.hypot(self.height) / 2.0
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.anchor, self.radius())
    }
}

impl ElementTrait for Circle {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.anchor.x - r,
            self.anchor.y - r,
            self.anchor.x + r,
            self.anchor.y + r,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_near_circle_outline(
            point,
            self.anchor,
            self.radius(),
            tolerance + self.style.stroke_width / 2.0,
        )
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn drag_to(&mut self, point: Point) {
        self.width = point.x - self.anchor.x;
        self.height = point.y - self.anchor.y;
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }
}
