//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between pixel coordinates (screen space) and canvas
//! coordinates (world space). Manages zoom and pan operations with proper
//! coordinate mapping.
//!
//! The offset is the canvas-space point shown at the screen origin, so:
//!
//! ```text
//! canvas_x = screen_x / zoom + offset_x
//! screen_x = (canvas_x - offset_x) * zoom
//! ```

use std::fmt;

use corkboard_core::constants::{MAX_ZOOM, MIN_ZOOM};
use corkboard_settings::ViewportSettings;

use crate::model::{Point, Rect};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// Creates a viewport at the canvas origin with 1:1 zoom.
    pub fn new() -> Self {
        Self::with_zoom_limits(MIN_ZOOM, MAX_ZOOM)
    }

    /// Creates a viewport with custom zoom bounds. Bounds that are not
    /// finite, positive and ordered fall back to the defaults.
    pub fn with_zoom_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let usable = min_zoom.is_finite()
            && max_zoom.is_finite()
            && min_zoom > 0.0
            && min_zoom < max_zoom;
        let (min_zoom, max_zoom) = if usable {
            (min_zoom, max_zoom)
        } else {
            (MIN_ZOOM, MAX_ZOOM)
        };
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    /// Creates a viewport from configuration.
    pub fn from_settings(settings: &ViewportSettings) -> Self {
        Self::with_zoom_limits(settings.min_zoom, settings.max_zoom)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Canvas x coordinate shown at the left screen edge.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Canvas y coordinate shown at the top screen edge.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Sets the pan offset directly.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Converts screen pixel coordinates to canvas coordinates.
    pub fn screen_to_canvas(&self, sx: f64, sy: f64) -> Point {
        Point::new(sx / self.zoom + self.offset_x, sy / self.zoom + self.offset_y)
    }

    /// Converts canvas coordinates to screen pixel coordinates.
    pub fn canvas_to_screen(&self, cx: f64, cy: f64) -> Point {
        Point::new(
            (cx - self.offset_x) * self.zoom,
            (cy - self.offset_y) * self.zoom,
        )
    }

    /// Pans by a screen-space delta.
    ///
    /// Dragging the content right moves the offset left; dividing by zoom
    /// keeps the perceived pan speed constant.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x -= dx / self.zoom;
        self.offset_y -= dy / self.zoom;
    }

    /// Multiplies the zoom by `factor`, keeping the canvas point under the
    /// screen point `(sx, sy)` fixed.
    ///
    /// Returns `true` if the zoom changed. At a clamp bound the zoom and
    /// offset are left untouched.
    pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) -> bool {
        let target = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        self.zoom_to(sx, sy, target)
    }

    /// Sets the zoom level, clamped to the configured bounds.
    ///
    /// With a screen center the zoom is anchored there; without one the
    /// offset is unchanged, anchoring at the top-left screen pixel.
    pub fn set_zoom(&mut self, zoom: f64, center: Option<(f64, f64)>) {
        let target = zoom.clamp(self.min_zoom, self.max_zoom);
        match center {
            Some((sx, sy)) => {
                self.zoom_to(sx, sy, target);
            }
            None => self.zoom = target,
        }
    }

    fn zoom_to(&mut self, sx: f64, sy: f64, target: f64) -> bool {
        if target == self.zoom {
            return false;
        }
        let anchor = self.screen_to_canvas(sx, sy);
        self.zoom = target;
        self.offset_x = anchor.x - sx / self.zoom;
        self.offset_y = anchor.y - sy / self.zoom;
        true
    }

    /// Returns the canvas-space rectangle visible in a screen of the given size.
    pub fn visible_rect(&self, screen_width: f64, screen_height: f64) -> Rect {
        let origin = self.screen_to_canvas(0.0, 0.0);
        Rect::new(
            origin.x,
            origin.y,
            screen_width / self.zoom,
            screen_height / self.zoom,
        )
    }

    /// Resets viewport to default state (1:1 zoom at the origin).
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.zoom, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
