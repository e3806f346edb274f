//! Shared default values for the canvas engine.
//!
//! Settings fall back to these when a configuration file omits a value.

/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f64 = 4.0;

/// Multiplicative step for toolbar zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;

/// Multiplicative step for one scroll-wheel notch.
pub const SCROLL_ZOOM_FACTOR: f64 = 1.1;

/// Edge length of one spatial index cell, in canvas units.
pub const SPATIAL_CELL_SIZE: f64 = 500.0;

/// Maximum number of commands kept on the undo stack.
pub const UNDO_DEPTH: usize = 50;

/// Half-extent of a resize handle hit area, in canvas units.
pub const HANDLE_SIZE: f64 = 10.0;

/// Size of the handle squares drawn around a selection.
pub const HANDLE_DRAW_SIZE: f64 = 8.0;

/// Floor for width/height on any direct resize.
pub const MIN_OBJECT_SIZE: f64 = 10.0;

/// Floor for width/height during an interactive resize gesture.
pub const MIN_RESIZE_SIZE: f64 = 20.0;

/// Offset applied to duplicated objects.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Grid pitch, in canvas units.
pub const GRID_SIZE: f64 = 25.0;

/// Every n-th grid line is drawn as a major line.
pub const GRID_MAJOR_INTERVAL: u32 = 4;

/// Minor grid lines are skipped when a cell is smaller than this on screen.
pub const GRID_MIN_CELL_PIXELS: f64 = 8.0;

/// Text placed in freshly added notes and text blocks.
pub const PLACEHOLDER_TEXT: &str = "Double-click to edit";
