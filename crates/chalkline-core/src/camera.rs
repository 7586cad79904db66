//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the whiteboard.
///
/// A device point relates to a model point by
/// `device = model * zoom + offset`, uniformly on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in device pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts model coordinates to device coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts device coordinates to model coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a device point to model coordinates.
    pub fn device_to_model(&self, device_point: Point) -> Point {
        self.inverse_transform() * device_point
    }

    /// Convert a model point to device coordinates.
    pub fn model_to_device(&self, model_point: Point) -> Point {
        self.transform() * model_point
    }

    /// Pan the camera by a raw device-pixel delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given device point fixed.
    pub fn zoom_at(&mut self, device_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let cursor = device_point.to_vec2();
        self.offset = cursor - (cursor - self.offset) * (new_zoom / self.zoom);
        self.zoom = new_zoom;
    }

    /// Scale around the device origin, leaving the offset untouched.
    ///
    /// Used by the zoom in/out buttons.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Set zoom and offset directly, clamping the zoom into range.
    pub fn set_view(&mut self, offset: Vec2, zoom: f64) {
        self.offset = offset;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Distance between grid lines in device pixels.
    pub fn grid_spacing(&self, grid_size: f64) -> f64 {
        grid_size * self.zoom
    }

    /// Device position of the first grid line on each axis.
    ///
    /// Always within `[0, spacing)` so the grid pans continuously.
    pub fn grid_origin(&self, grid_size: f64) -> Point {
        let spacing = self.grid_spacing(grid_size);
        if spacing <= 0.0 || !spacing.is_finite() {
            return Point::ZERO;
        }
        Point::new(
            self.offset.x.rem_euclid(spacing),
            self.offset.y.rem_euclid(spacing),
        )
    }
}
