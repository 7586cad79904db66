//! Rectangle outline.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::geometry::point_near_rect_outline;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An unfilled rectangle spanned by the anchor and `anchor + (width, height)`.
///
/// Width and height may be negative when the drag went up or left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Corner where the drag started.
    #[serde(flatten)]
    pub anchor: Point,
    /// Signed horizontal extent.
    pub width: f64,
    /// Signed vertical extent.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Rectangle {
    /// Create an empty rectangle at `anchor`.
    pub fn new(id: ElementId, anchor: Point, style: ElementStyle) -> Self {
        Self {
            id,
            anchor,
            width: 0.0,
            height: 0.0,
            style,
        }
    }

    /// Create a rectangle from an anchor and a signed extent.
    pub fn with_size(
        id: ElementId,
        anchor: Point,
        width: f64,
        height: f64,
        style: ElementStyle,
    ) -> Self {
        Self {
            id,
            anchor,
            width,
            height,
            style,
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.anchor + Vec2::new(self.width, self.height))
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    /// Outline only: the interior never hits.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_near_rect_outline(point, self.as_rect(), tolerance + self.style.stroke_width / 2.0)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
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
