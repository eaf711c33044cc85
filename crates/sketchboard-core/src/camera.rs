//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Smallest zoom the toolbar can reach.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest zoom the toolbar can reach.
pub const MAX_ZOOM: f64 = 3.0;
/// Additive step applied by `zoom_in`/`zoom_out`.
pub const ZOOM_STEP: f64 = 0.1;

/// Camera manages the view transform for the canvas.
///
/// Screen coordinates relate to scene coordinates by
/// `screen = scene * zoom + offset`, so the inverse is
/// `scene = (screen - offset) / zoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts scene coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to scene coordinates.
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a scene point to screen coordinates.
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom + self.offset.x,
            scene.y * self.zoom + self.offset.y,
        )
    }

    /// Step the zoom up by [`ZOOM_STEP`], stopping at [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Step the zoom down by [`ZOOM_STEP`], stopping at [`MIN_ZOOM`].
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Set the zoom, clamped to the allowed range.
    ///
    /// The value is snapped to hundredths so that repeated steps never
    /// accumulate floating point drift.
    pub fn set_zoom(&mut self, zoom: f64) {
        let snapped = (zoom * 100.0).round() / 100.0;
        self.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Pan so that `anchor` (a scene point) sits under `screen`.
    pub fn pan_to(&mut self, anchor: Point, screen: Point) {
        self.offset = Vec2::new(
            screen.x - anchor.x * self.zoom,
            screen.y - anchor.y * self.zoom,
        );
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = DEFAULT_ZOOM;
    }
}
