//! Element definitions for the whiteboard.

mod arrow;
mod circle;
mod line;
mod pen;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use line::Line;
pub use pen::Pen;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Stored as a plain string so records written by older builds (which used
/// millisecond timestamps) keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stroke properties shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Stroke color in any CSS color syntax.
    pub color: String,
    /// Stroke width in model units.
    pub stroke_width: f64,
}

impl ElementStyle {
    pub fn new(color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            color: color.into(),
            stroke_width,
        }
    }

    /// Parse the stroke color, falling back to opaque black.
    pub fn stroke(&self) -> Color {
        match parse_color(&self.color) {
            Ok(color) => color.to_alpha_color::<Srgb>(),
            Err(err) => {
                log::warn!("Unreadable stroke color {:?}: {}", self.color, err);
                Color::BLACK
            }
        }
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COLOR, crate::config::DEFAULT_STROKE_WIDTH)
    }
}

/// Common behavior for all element variants.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> &ElementId;

    /// Get the bounding box in model coordinates.
    fn bounds(&self) -> Rect;

    /// Check whether a point comes within `tolerance` of the stroked outline.
    ///
    /// Half the element's own stroke width is added to `tolerance`.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the outline path in model coordinates.
    fn to_path(&self) -> BezPath;

    /// Follow the pointer while the element is being drawn.
    fn drag_to(&mut self, point: Point);

    /// Get the style.
    fn style(&self) -> &ElementStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ElementStyle;
}

/// A drawable unit on the whiteboard.
///
/// Serialized with a `type` tag, matching the persisted record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Pen(Pen),
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Arrow(Arrow),
    Text(Text),
}

impl Element {
    pub fn id(&self) -> &ElementId {
        match self {
            Element::Pen(e) => e.id(),
            Element::Line(e) => e.id(),
            Element::Rectangle(e) => e.id(),
            Element::Circle(e) => e.id(),
            Element::Arrow(e) => e.id(),
            Element::Text(e) => e.id(),
        }
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        match self {
            Element::Pen(e) => e.id = id,
            Element::Line(e) => e.id = id,
            Element::Rectangle(e) => e.id = id,
            Element::Circle(e) => e.id = id,
            Element::Arrow(e) => e.id = id,
            Element::Text(e) => e.id = id,
        }
    }

    /// Variant tag as written in the persisted record.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Pen(_) => "pen",
            Element::Line(_) => "line",
            Element::Rectangle(_) => "rectangle",
            Element::Circle(_) => "circle",
            Element::Arrow(_) => "arrow",
            Element::Text(_) => "text",
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Pen(e) => e.bounds(),
            Element::Line(e) => e.bounds(),
            Element::Rectangle(e) => e.bounds(),
            Element::Circle(e) => e.bounds(),
            Element::Arrow(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Element::Pen(e) => e.hit_test(point, tolerance),
            Element::Line(e) => e.hit_test(point, tolerance),
            Element::Rectangle(e) => e.hit_test(point, tolerance),
            Element::Circle(e) => e.hit_test(point, tolerance),
            Element::Arrow(e) => e.hit_test(point, tolerance),
            Element::Text(e) => e.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Element::Pen(e) => e.to_path(),
            Element::Line(e) => e.to_path(),
            Element::Rectangle(e) => e.to_path(),
            Element::Circle(e) => e.to_path(),
            Element::Arrow(e) => e.to_path(),
            Element::Text(e) => e.to_path(),
        }
    }

    pub fn drag_to(&mut self, point: Point) {
        match self {
            Element::Pen(e) => e.drag_to(point),
            Element::Line(e) => e.drag_to(point),
            Element::Rectangle(e) => e.drag_to(point),
            Element::Circle(e) => e.drag_to(point),
            Element::Arrow(e) => e.drag_to(point),
            Element::Text(e) => e.drag_to(point),
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Pen(e) => e.style(),
            Element::Line(e) => e.style(),
            Element::Rectangle(e) => e.style(),
            Element::Circle(e) => e.style(),
            Element::Arrow(e) => e.style(),
            Element::Text(e) => e.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            Element::Pen(e) => e.style_mut(),
            Element::Line(e) => e.style_mut(),
            Element::Rectangle(e) => e.style_mut(),
            Element::Circle(e) => e.style_mut(),
            Element::Arrow(e) => e.style_mut(),
            Element::Text(e) => e.style_mut(),
        }
    }

    /// Get the text label if this element is a text element.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Whether the element carries enough geometry to be kept.
    ///
    /// Only a pen stroke without points fails this.
    pub fn is_drawable(&self) -> bool {
        match self {
            Element::Pen(p) => !p.points.is_empty(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ElementId::generate();
        let b = ElementId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_stroke_color() {
        let style = ElementStyle::new("#ff0000", 2.0);
        let rgba = style.stroke().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 255));

        let style = ElementStyle::new("#51ff00ff", 2.0);
        let rgba = style.stroke().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x51, 0xff, 0x00));
    }

    #[test]
    fn test_unreadable_color_falls_back_to_black() {
        let style = ElementStyle::new("not a color", 2.0);
        let rgba = style.stroke().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0, 0, 0, 255));
    }

    #[test]
    fn test_deserialize_legacy_records() {
        let value = json!([
            {
                "id": "1712345678901",
                "type": "pen",
                "color": "#000000",
                "strokeWidth": 6,
                "points": [{"x": 0, "y": 0}, {"x": 10, "y": 0}],
                "x": 0, "y": 0, "width": 0, "height": 0
            },
            {
                "id": "1712345678902",
                "type": "rectangle",
                "color": "#ff0000",
                "strokeWidth": 2,
                "x": 5, "y": 5, "width": 20, "height": -10
            },
            {
                "id": "1712345678903",
                "type": "text",
                "color": "#ff0000",
                "strokeWidth": 2,
                "x": 1, "y": 2, "width": 0, "height": 0
            }
        ]);
        let elements: Vec<Element> = serde_json::from_value(value).unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].kind(), "pen");
        assert_eq!(elements[0].id().as_str(), "1712345678901");
        match &elements[1] {
            Element::Rectangle(r) => {
                assert_eq!(r.anchor, Point::new(5.0, 5.0));
                assert!((r.height + 10.0).abs() < f64::EPSILON);
                assert!((r.style.stroke_width - 2.0).abs() < f64::EPSILON);
            }
            other => panic!("expected rectangle, got {:?}", other),
        }
        assert_eq!(elements[2].as_text().map(|t| t.text.as_str()), Some(""));
    }

    #[test]
    fn test_serialize_shape_is_flat() {
        let circle = Element::Circle(Circle::new(
            ElementId::from("c1"),
            Point::new(1.0, 2.0),
            ElementStyle::new("#00ff00", 3.0),
        ));
        let value = serde_json::to_value(&circle).unwrap();
        assert_eq!(value["type"], "circle");
        assert_eq!(value["id"], "c1");
        assert_eq!(value["x"], 1.0);
        assert_eq!(value["y"], 2.0);
        assert_eq!(value["width"], 0.0);
        assert_eq!(value["strokeWidth"], 3.0);
        assert_eq!(value["color"], "#00ff00");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let value = json!({"id": "x", "type": "hexagon", "color": "#000", "strokeWidth": 1});
        assert!(serde_json::from_value::<Element>(value).is_err());
    }
}
