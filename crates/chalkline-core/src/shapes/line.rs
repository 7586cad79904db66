//! Straight line.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::geometry::point_to_segment_dist;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line from the anchor to `anchor + (width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ElementId,
    /// Start point.
    #[serde(flatten)]
    pub anchor: Point,
    /// Horizontal delta to the end point.
    pub width: f64,
    /// Vertical delta to the end point.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Line {
    /// Create a zero-length line at `anchor`.
    pub fn new(id: ElementId, anchor: Point, style: ElementStyle) -> Self {
        Self {
            id,
            anchor,
            width: 0.0,
            height: 0.0,
            style,
        }
    }

    /// End point of the line.
    pub fn end(&self) -> Point {
        self.anchor + Vec2::new(self.width, self.height)
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.anchor, self.end())
    }
}

impl ElementTrait for Line {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.anchor, self.end())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.anchor, self.end())
            <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.anchor);
        path.line_to(self.end());
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

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f64, y: f64, w: f64, h: f64) -> Line {
        let mut line = Line::new(
            ElementId::from("l"),
            Point::new(x, y),
            ElementStyle::new("#000", 2.0),
        );
        line.width = w;
        line.height = h;
        line
    }

    #[test]
    fn test_drag_sets_delta() {
        let mut l = Line::new(
            ElementId::from("l"),
            Point::new(10.0, 10.0),
            ElementStyle::default(),
        );
        l.drag_to(Point::new(4.0, 30.0));
        assert!((l.width + 6.0).abs() < f64::EPSILON);
        assert!((l.height - 20.0).abs() < f64::EPSILON);
        assert_eq!(l.end(), Point::new(4.0, 30.0));
    }

    #[test]
    fn test_hit_test_on_line() {
        let l = line(0.0, 0.0, 100.0, 0.0);
        assert!(l.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(l.hit_test(Point::new(50.0, 5.0), 4.0));
        assert!(!l.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_hit_test_endpoints() {
        let l = line(0.0, 0.0, 100.0, 0.0);
        assert!(l.hit_test(Point::new(-2.0, 0.0), 1.0));
        assert!(l.hit_test(Point::new(102.0, 0.0), 1.0));
        assert!(!l.hit_test(Point::new(104.0, 0.0), 1.0));
    }

    #[test]
    fn test_bounds_with_negative_delta() {
        let b = line(50.0, 80.0, -40.0, -60.0).bounds();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (10.0, 20.0, 50.0, 80.0));
    }
}
