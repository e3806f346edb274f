//! Background grid and snapping.

use corkboard_core::constants::{GRID_MAJOR_INTERVAL, GRID_MIN_CELL_PIXELS, GRID_SIZE};
use corkboard_settings::GridSettings;

use crate::model::{Point, Rect};

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A line of constant x.
    Vertical,
    /// A line of constant y.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    /// Canvas coordinate of the line.
    pub position: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub size: f64,
    pub major_interval: u32,
    pub visible: bool,
    pub snap_enabled: bool,
    pub min_cell_pixels: f64,
}

impl Grid {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            major_interval: GRID_MAJOR_INTERVAL,
            visible: false,
            snap_enabled: false,
            min_cell_pixels: GRID_MIN_CELL_PIXELS,
        }
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self {
            size: settings.size,
            major_interval: settings.major_interval.max(1),
            visible: settings.visible,
            snap_enabled: settings.snap,
            min_cell_pixels: settings.min_cell_pixels,
        }
    }

    /// Rounds `value` to the nearest grid line when snapping is enabled.
    pub fn snap(&self, value: f64) -> f64 {
        if self.snap_enabled {
            (value / self.size).round() * self.size
        } else {
            value
        }
    }

    pub fn snap_point(&self, point: Point) -> Point {
        Point::new(self.snap(point.x), self.snap(point.y))
    }

    /// Rounds a size to whole grid units, never below one unit.
    pub fn snap_size(&self, value: f64) -> f64 {
        if self.snap_enabled {
            self.size.max((value / self.size).round() * self.size)
        } else {
            value
        }
    }

    /// Lines covering `visible`, in canvas units.
    ///
    /// Minor lines are omitted when one cell is smaller than
    /// `min_cell_pixels` on screen at `zoom`.
    pub fn lines(&self, visible: &Rect, zoom: f64) -> Vec<GridLine> {
        let interval = i64::from(self.major_interval.max(1));
        let show_minor = self.size * zoom >= self.min_cell_pixels;
        let step = if show_minor { 1 } else { interval };

        let mut lines = Vec::new();
        let mut emit = |axis: Axis, start: f64, end: f64| {
            let first = (start / self.size).floor() as i64;
            let last = (end / self.size).ceil() as i64;
            let first = if step > 1 {
                first.div_euclid(step) * step
            } else {
                first
            };
            let mut i = first;
            while i <= last {
                lines.push(GridLine {
                    axis,
                    position: i as f64 * self.size,
                    major: i.rem_euclid(interval) == 0,
                });
                i += step;
            }
        };
        emit(Axis::Vertical, visible.x, visible.right());
        emit(Axis::Horizontal, visible.y, visible.bottom());
        lines
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}
