//! Arrow shape.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::geometry::point_to_segment_dist;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;

/// A line with an open arrowhead at `anchor + (width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ElementId,
    /// Tail of the arrow.
    #[serde(flatten)]
    pub anchor: Point,
    /// Horizontal delta to the tip.
    pub width: f64,
    /// Vertical delta to the tip.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Arrow {
    /// Length of each arrowhead barb in model units.
    pub const HEAD_SIZE: f64 = 15.0;

    /// Create a zero-length arrow at `anchor`.
    pub fn new(id: ElementId, anchor: Point, style: ElementStyle) -> Self {
        Self {
            id,
            anchor,
            width: 0.0,
            height: 0.0,
            style,
        }
    }

    /// Tip of the arrow.
    pub fn tip(&self) -> Point {
        self.anchor + Vec2::new(self.width, self.height)
    }

    /// End points of the two arrowhead barbs.
    pub fn head_points(&self) -> [Point; 2] {
        let tip = self.tip();
        let angle = self.height.atan2(self.width);
        let barb = |a: f64| {
            Point::new(
                tip.x - Self::HEAD_SIZE * a.cos(),
                tip.y - Self::HEAD_SIZE * a.sin(),
            )
        };
        [barb(angle - FRAC_PI_6), barb(angle + FRAC_PI_6)]
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let [left, right] = self.head_points();
        Rect::from_points(self.anchor, self.tip())
            .union_pt(left)
            .union_pt(right)
    }

    /// Only the shaft counts; the barbs are decoration.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.anchor, self.tip())
            <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let tip = self.tip();
        let [left, right] = self.head_points();

        let mut path = BezPath::new();
        path.move_to(self.anchor);
        path.line_to(tip);
        path.move_to(tip);
        path.line_to(left);
        path.move_to(tip);
        path.line_to(right);
        path
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
