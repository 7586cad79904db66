//! Geometric helpers used for hit-testing.

use kurbo::{Point, Rect, Vec2};

/// Distance from a point to a line segment (a→b).
///
/// Degenerate segments (a == b) measure the distance to `a`; the projection
/// parameter is saturated to the nearest endpoint otherwise.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// A single-point polyline is treated as a zero-length segment. Returns
/// infinity for an empty slice.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// The four outline edges of a rectangle, clockwise from the top-left corner.
pub fn rect_edges(rect: Rect) -> [(Point, Point); 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [(tl, tr), (tr, br), (br, bl), (bl, tl)]
}

/// Check whether a point lies within `threshold` of a rectangle's outline.
///
/// The interior does not count. Points outside the rectangle grown by
/// `threshold` on every side are rejected before any edge is measured.
pub fn point_near_rect_outline(point: Point, rect: Rect, threshold: f64) -> bool {
    let rect = rect.abs();
    let outer = rect.inflate(threshold, threshold);
    if point.x < outer.x0 || point.x > outer.x1 || point.y < outer.y0 || point.y > outer.y1 {
        return false;
    }
    rect_edges(rect)
        .iter()
        .any(|&(a, b)| point_to_segment_dist(point, a, b) <= threshold)
}

/// Check whether a point lies within `threshold` of a circle's outline.
pub fn point_near_circle_outline(point: Point, center: Point, radius: f64, threshold: f64) -> bool {
    (point.distance(center) - radius).abs() <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_dist(Point::new(5.0, 3.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_segment_distance_saturates_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let before = point_to_segment_dist(Point::new(-3.0, 4.0), a, b);
        let after = point_to_segment_dist(Point::new(13.0, 4.0), a, b);
        assert!((before - 5.0).abs() < 1e-10);
        assert!((after - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Point::new(2.0, 2.0);
        let d = point_to_segment_dist(Point::new(5.0, 6.0), p, p);
        assert!((d - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_polyline_distance() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let d = point_to_polyline_dist(Point::new(12.0, 5.0), &pts);
        assert!((d - 2.0).abs() < 1e-10);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
        let single = point_to_polyline_dist(Point::new(3.0, 4.0), &[Point::ZERO]);
        assert!((single - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_rect_outline_hits_edge_not_interior() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(point_near_rect_outline(Point::new(50.0, 2.0), rect, 3.0));
        assert!(point_near_rect_outline(Point::new(103.0, 25.0), rect, 3.0));
        assert!(!point_near_rect_outline(Point::new(50.0, 25.0), rect, 3.0));
        assert!(!point_near_rect_outline(Point::new(150.0, 25.0), rect, 3.0));
    }

    #[test]
    fn test_rect_outline_with_negative_extent() {
        // Rectangle dragged up and to the left of its anchor.
        let rect = Rect::new(20.0, 20.0, 0.0, 0.0);
        assert!(point_near_rect_outline(Point::new(10.0, 0.0), rect, 1.0));
        assert!(point_near_rect_outline(Point::new(10.0, 21.0), rect, 1.0));
    }

    #[test]
    fn test_rect_outline_far_margin_boundary() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_near_rect_outline(Point::new(12.0, 5.0), rect, 2.0));
    }

    #[test]
    fn test_circle_outline() {
        let c = Point::new(0.0, 0.0);
        assert!(point_near_circle_outline(Point::new(10.0, 0.0), c, 10.0, 1.0));
        assert!(point_near_circle_outline(Point::new(0.0, 10.5), c, 10.0, 1.0));
        assert!(!point_near_circle_outline(Point::new(0.0, 0.0), c, 10.0, 1.0));
    }
}
