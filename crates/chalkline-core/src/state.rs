//! Persisted whiteboard state.

use crate::shapes::Element;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The record stored by the host: elements plus the view transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardState {
    pub elements: Vec<Element>,
    pub view_offset: Vec2,
    pub zoom: f64,
    /// Milliseconds since the Unix epoch at the last save.
    #[serde(default)]
    pub last_modified: u64,
}

impl Default for WhiteboardState {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            view_offset: Vec2::ZERO,
            zoom: 1.0,
            last_modified: 0,
        }
    }
}

impl WhiteboardState {
    /// Build a state from possibly malformed JSON, repairing field by field.
    ///
    /// Unreadable elements are dropped individually; a bad view offset becomes
    /// the origin and a bad zoom becomes 1. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                log::warn!("Persisted state is not an object; starting empty");
            }
            return Self::default();
        };

        let elements = match object.get("elements") {
            Some(Value::Array(items)) => items.iter().filter_map(read_element).collect(),
            Some(other) => {
                log::warn!("Persisted elements is not a list: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        let view_offset = object
            .get("viewOffset")
            .and_then(|v| serde_json::from_value::<Vec2>(v.clone()).ok())
            .filter(|v| v.x.is_finite() && v.y.is_finite())
            .unwrap_or_else(|| {
                log::warn!("Missing or invalid viewOffset; using origin");
                Vec2::ZERO
            });

        let zoom = object
            .get("zoom")
            .and_then(Value::as_f64)
            .filter(|z| z.is_finite() && *z > 0.0)
            .unwrap_or_else(|| {
                log::warn!("Missing or invalid zoom; using 1");
                1.0
            });

        let last_modified = object
            .get("lastModified")
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
            .unwrap_or(0);

        Self {
            elements,
            view_offset,
            zoom,
            last_modified,
        }
    }

    /// Parse JSON text leniently. Unparseable text yields the empty state.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("Persisted state is not valid JSON: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn read_element(value: &Value) -> Option<Element> {
    match serde_json::from_value::<Element>(value.clone()) {
        Ok(element) if element.is_drawable() => Some(element),
        Ok(element) => {
            log::warn!("Dropping {} element {} with no geometry", element.kind(), element.id());
            None
        }
        Err(e) => {
            log::warn!("Dropping unreadable element: {}", e);
            None
        }
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    use web_time::{SystemTime, UNIX_EPOCH};
    #[cfg(not(target_arch = "wasm32"))]
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_persisted_shape() {
        let state = WhiteboardState {
            last_modified: 42,
            ..WhiteboardState::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({"elements": [], "viewOffset": {"x": 0.0, "y": 0.0}, "zoom": 1.0, "lastModified": 42})
        );
    }

    #[test]
    fn test_lenient_load_repairs_fields() {
        let value = json!({
            "elements": [
                {"id": "1", "type": "line", "color": "#000", "strokeWidth": 2, "x": 0, "y": 0, "width": 5, "height": 5},
                {"id": "2", "type": "blob"},
                {"id": "3", "type": "pen", "color": "#000", "strokeWidth": 2, "points": []},
                "garbage"
            ],
            "viewOffset": "nowhere",
            "zoom": -3
        });
        let state = WhiteboardState::from_value(&value);
        assert_eq!(state.elements.len(), 1);
        assert_eq!(state.elements[0].id().as_str(), "1");
        assert_eq!(state.view_offset, Vec2::ZERO);
        assert!((state.zoom - 1.0).abs() < f64::EPSILON);
        assert_eq!(state.last_modified, 0);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(WhiteboardState::from_value(&json!(null)), WhiteboardState::default());
        assert_eq!(WhiteboardState::from_value(&json!([1, 2])), WhiteboardState::default());
        assert_eq!(WhiteboardState::from_json("{not json"), WhiteboardState::default());
    }

    #[test]
    fn test_json_roundtrip_keeps_view() {
        let json = r#"{"elements": [], "viewOffset": {"x": 12.5, "y": -3}, "zoom": 2.5, "lastModified": 1700000000000}"#;
        let state = WhiteboardState::from_json(json);
        assert_eq!(state.view_offset, Vec2::new(12.5, -3.0));
        assert!((state.zoom - 2.5).abs() < f64::EPSILON);
        assert_eq!(state.last_modified, 1_700_000_000_000);
        assert_eq!(WhiteboardState::from_json(&state.to_json().unwrap()), state);
    }

    #[test]
    fn test_now_millis_is_recent() {
        assert!(now_millis() > 1_600_000_000_000);
    }
}
