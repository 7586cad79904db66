//! Session configuration and shared defaults.

use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Stroke color new sessions start with.
pub const DEFAULT_COLOR: &str = "#51ff00ff";

/// Stroke width new sessions start with, in model units.
pub const DEFAULT_STROKE_WIDTH: f64 = 6.0;

/// Model units between grid lines.
pub const GRID_SIZE: f64 = 20.0;

/// Colors offered by the toolbar.
pub const PALETTE: [&str; 15] = [
    "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
    "#ff8800", "#8800ff", "#ff0088", "#88ff00", "#0088ff", "#808080", "#ff6b6b",
];

/// Tunables for a drawing session.
///
/// Every field has a default, so hosts may supply a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub default_tool: ToolKind,
    pub default_color: String,
    pub default_stroke_width: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor for one wheel tick towards the user.
    pub wheel_zoom_in: f64,
    /// Zoom factor for one wheel tick away from the user.
    pub wheel_zoom_out: f64,
    /// Factor for the zoom in/out buttons.
    pub button_zoom_step: f64,
    pub grid_size: f64,
    /// Eraser radius as a multiple of the current stroke width.
    pub eraser_radius_factor: f64,
    /// Maximum number of history entries kept.
    pub max_history: usize,
    /// Label placed by the text tool.
    pub text_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_tool: ToolKind::Pen,
            default_color: DEFAULT_COLOR.to_string(),
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            button_zoom_step: 1.2,
            grid_size: GRID_SIZE,
            eraser_radius_factor: 2.0,
            max_history: 100,
            text_label: "Text".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a host-supplied JSON object, keeping defaults for missing fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace out-of-range values with their defaults, logging each one.
    ///
    /// Zoom limits must be positive, finite and ordered; factors, sizes and
    /// widths must be positive and finite.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn check(name: &str, value: &mut f64, fallback: f64) {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("Rejected {name} {value}, using {fallback}");
                *value = fallback;
            }
        }

        check(
            "defaultStrokeWidth",
            &mut self.default_stroke_width,
            defaults.default_stroke_width,
        );
        check("minZoom", &mut self.min_zoom, defaults.min_zoom);
        check("maxZoom", &mut self.max_zoom, defaults.max_zoom);
        check("wheelZoomIn", &mut self.wheel_zoom_in, defaults.wheel_zoom_in);
        check("wheelZoomOut", &mut self.wheel_zoom_out, defaults.wheel_zoom_out);
        check(
            "buttonZoomStep",
            &mut self.button_zoom_step,
            defaults.button_zoom_step,
        );
        check("gridSize", &mut self.grid_size, defaults.grid_size);
        check(
            "eraserRadiusFactor",
            &mut self.eraser_radius_factor,
            defaults.eraser_radius_factor,
        );

        if self.min_zoom > self.max_zoom {
            log::warn!(
                "Rejected zoom range {}..{}, using {}..{}",
                self.min_zoom,
                self.max_zoom,
                defaults.min_zoom,
                defaults.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }

        if self.max_history == 0 {
            log::warn!("Rejected maxHistory 0, using {}", defaults.max_history);
            self.max_history = defaults.max_history;
        }

        self
    }
}
