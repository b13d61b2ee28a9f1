//! Camera module for pan/zoom transforms.

use crate::geometry::{self, ScreenPoint};
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom the wheel can reach.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom the wheel can reach.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom factor applied per wheel notch scrolling down (zoom out).
const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Zoom factor applied per wheel notch scrolling up (zoom in).
const WHEEL_ZOOM_IN: f64 = 1.1;

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates.
/// The offset is never clamped: the canvas is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom bounds.
    pub fn with_zoom_bounds(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: ScreenPoint) -> Point {
        geometry::screen_to_world(screen_point, self.offset, self.zoom)
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> ScreenPoint {
        geometry::world_to_screen(world_point, self.offset, self.zoom)
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: ScreenPoint, factor: f64) {
        self.zoom_to(screen_point, self.zoom * factor);
    }

    /// Set the zoom level (clamped), keeping the given screen point fixed.
    ///
    /// Inverted bounds resolve to `max_zoom`; a non-positive or non-finite
    /// result leaves the camera untouched.
    pub fn zoom_to(&mut self, screen_point: ScreenPoint, zoom: f64) {
        let new_zoom = zoom.max(self.min_zoom).min(self.max_zoom);
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            return;
        }
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        // Convert screen point to world before zoom
        let world_point = self.screen_to_world(screen_point);

        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point.delta_from(new_screen);
    }

    /// Apply one wheel event at `screen_point`.
    ///
    /// A positive delta (scrolling down) zooms out, a negative one zooms in.
    /// Returns false when the zoom did not change (zero delta or already at
    /// the bound).
    pub fn zoom_for_wheel(&mut self, screen_point: ScreenPoint, delta: f64) -> bool {
        if delta == 0.0 || delta.is_nan() {
            return false;
        }
        let factor = if delta > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        let before = self.zoom;
        self.zoom_at(screen_point, factor);
        self.zoom != before
    }
}
