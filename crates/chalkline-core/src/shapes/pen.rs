//! Freehand pen stroke.

use super::{ElementId, ElementStyle, ElementTrait};
use crate::geometry::point_to_polyline_dist;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of points in model space).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub(crate) id: ElementId,
    /// Points in drawing order. Append-only while the stroke is active.
    pub points: Vec<Point>,
    /// Style properties.
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Pen {
    /// Start a stroke at `start`.
    pub fn new(id: ElementId, start: Point, style: ElementStyle) -> Self {
        Self {
            id,
            points: vec![start],
            style,
        }
    }

    /// Create from existing points.
    pub fn from_points(id: ElementId, points: Vec<Point>, style: ElementStyle) -> Self {
        Self { id, points, style }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ElementTrait for Pen {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        if self.points.len() == 1 {
            // A click without movement still leaves a visible dot with round caps.
            path.line_to(*first);
            return path;
        }
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }

    fn drag_to(&mut self, point: Point) {
        self.add_point(point);
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

    fn pen(points: &[(f64, f64)]) -> Pen {
        Pen::from_points(
            ElementId::from("p"),
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            ElementStyle::new("#000", 2.0),
        )
    }

    #[test]
    fn test_drag_appends_points() {
        let mut p = Pen::new(ElementId::from("p"), Point::ZERO, ElementStyle::default());
        p.drag_to(Point::new(10.0, 0.0));
        p.drag_to(Point::new(10.0, 10.0));
        assert_eq!(p.len(), 3);
        assert_eq!(p.points[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_hit_test_includes_half_stroke_width() {
        let p = pen(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(p.hit_test(Point::new(50.0, 5.0), 4.0));
        assert!(!p.hit_test(Point::new(50.0, 5.5), 4.0));
    }

    #[test]
    fn test_single_point_stroke_is_hittable() {
        let p = pen(&[(10.0, 10.0)]);
        assert!(p.hit_test(Point::new(12.0, 10.0), 1.0));
        assert!(!p.to_path().elements().is_empty());
    }

    #[test]
    fn test_bounds() {
        let p = pen(&[(10.0, 20.0), (-5.0, 40.0), (30.0, 0.0)]);
        let b = p.bounds();
        assert_eq!((b.x0, b.y0, b.x1, b.y1), (-5.0, 0.0, 30.0, 40.0));
    }
}
