//! Tool system for the whiteboard.

use crate::config::SessionConfig;
use crate::shapes::{Arrow, Circle, Element, ElementId, ElementStyle, Line, Pen, Rectangle, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Drag to pan the view.
    Hand,
    #[default]
    Pen,
    Eraser,
    Line,
    Arrow,
    Rectangle,
    Circle,
    Text,
}

impl ToolKind {
    /// Map a single-letter keyboard shortcut to a tool (case-insensitive).
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'h' => Some(ToolKind::Hand),
            'p' => Some(ToolKind::Pen),
            'e' => Some(ToolKind::Eraser),
            'l' => Some(ToolKind::Line),
            'a' => Some(ToolKind::Arrow),
            'r' => Some(ToolKind::Rectangle),
            'c' => Some(ToolKind::Circle),
            _ => None,
        }
    }

    /// Whether this tool creates a new element on pointer down.
    pub fn creates_element(&self) -> bool {
        !matches!(self, ToolKind::Hand | ToolKind::Eraser)
    }

    /// Get all tools in toolbar order.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Hand,
            ToolKind::Pen,
            ToolKind::Eraser,
            ToolKind::Line,
            ToolKind::Arrow,
            ToolKind::Rectangle,
            ToolKind::Circle,
            ToolKind::Text,
        ]
    }
}

/// Current tool and the style applied to new elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    /// Currently selected tool.
    pub tool: ToolKind,
    /// Stroke color for new elements.
    pub color: String,
    /// Stroke width for new elements, and the eraser base size.
    pub stroke_width: f64,
    /// Label placed by the text tool.
    pub text_label: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl ToolSettings {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            tool: config.default_tool,
            color: config.default_color.clone(),
            stroke_width: config.default_stroke_width,
            text_label: config.text_label.clone(),
        }
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Set the stroke width. Returns false (and keeps the old width) if the
    /// value is not a positive finite number.
    pub fn set_stroke_width(&mut self, width: f64) -> bool {
        if !(width.is_finite() && width > 0.0) {
            log::warn!("Ignoring stroke width {}", width);
            return false;
        }
        self.stroke_width = width;
        true
    }

    /// Style for a new element.
    pub fn style(&self) -> ElementStyle {
        ElementStyle::new(self.color.clone(), self.stroke_width)
    }

    /// Create the in-progress element for the current tool, anchored at `at`.
    ///
    /// Returns `None` for tools that don't create elements.
    pub fn start_element(&self, at: Point) -> Option<Element> {
        let id = ElementId::generate();
        let style = self.style();
        let element = match self.tool {
            ToolKind::Hand | ToolKind::Eraser => return None,
            ToolKind::Pen => Element::Pen(Pen::new(id, at, style)),
            ToolKind::Line => Element::Line(Line::new(id, at, style)),
            ToolKind::Arrow => Element::Arrow(Arrow::new(id, at, style)),
            ToolKind::Rectangle => Element::Rectangle(Rectangle::new(id, at, style)),
            ToolKind::Circle => Element::Circle(Circle::new(id, at, style)),
            ToolKind::Text => Element::Text(Text::new(id, at, self.text_label.clone(), style)),
        };
        Some(element)
    }
}
