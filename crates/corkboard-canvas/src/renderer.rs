//! Scene renderer.
//!
//! Drawing goes through the [`DrawContext`] trait so the engine does not
//! depend on a particular graphics backend. The host supplies a context
//! (a Cairo wrapper, a test recorder, ...) and calls [`render_scene`] when
//! a redraw is requested.
//!
//! Draw order:
//! 1. Background, in screen space
//! 2. Grid lines, if the grid is visible
//! 3. Visible objects, ascending z
//! 4. Hover outlines and selection handles
//! 5. Rubber-band rectangle

use std::path::Path;

use corkboard_core::constants::HANDLE_DRAW_SIZE;
use corkboard_core::AssetError;

use crate::grid::{Axis, Grid};
use crate::model::{Rect, ResizeHandle, SceneObject};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Minimal immediate-mode drawing surface, modeled on Cairo.
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64);
    fn set_line_width(&mut self, width: f64);
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn select_font(&mut self, family: &str, size: f64);
    /// Advance width of `text` in the current font.
    fn text_width(&self, text: &str) -> f64;
    /// Draws `text` with its baseline starting at `(x, y)`.
    fn show_text(&mut self, x: f64, y: f64, text: &str);
    /// Draws the image at `path` scaled into `rect`.
    fn draw_image(&mut self, path: &Path, rect: &Rect) -> Result<(), AssetError>;
}

/// Everything one frame needs besides the drawing surface.
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub viewport: &'a Viewport,
    pub grid: &'a Grid,
    pub screen_width: f64,
    pub screen_height: f64,
    pub rubber_band: Option<Rect>,
}

const BACKGROUND: (f64, f64, f64) = (0.96, 0.96, 0.94);
const SELECTION: (f64, f64, f64) = (0.2, 0.5, 1.0);

/// Renders one frame. Returns the number of objects drawn.
pub fn render_scene(ctx: &mut dyn DrawContext, frame: &Frame<'_>) -> usize {
    let (r, g, b) = BACKGROUND;
    ctx.set_source_rgba(r, g, b, 1.0);
    ctx.rectangle(0.0, 0.0, frame.screen_width, frame.screen_height);
    ctx.fill();

    let zoom = frame.viewport.zoom();
    let visible = frame
        .viewport
        .visible_rect(frame.screen_width, frame.screen_height);

    ctx.save();
    ctx.scale(zoom, zoom);
    ctx.translate(-frame.viewport.offset_x(), -frame.viewport.offset_y());

    if frame.grid.visible {
        draw_grid(ctx, frame.grid, &visible, zoom);
    }

    let objects = frame.scene.visible_objects(&visible);
    for obj in &objects {
        obj.render(ctx);
    }

    for obj in &objects {
        if obj.selected {
            draw_selection(ctx, obj, zoom);
        } else if obj.hovered {
            draw_hover(ctx, obj, zoom);
        }
    }

    if let Some(band) = &frame.rubber_band {
        draw_rubber_band(ctx, band, zoom);
    }

    ctx.restore();
    objects.len()
}

fn draw_grid(ctx: &mut dyn DrawContext, grid: &Grid, visible: &Rect, zoom: f64) {
    ctx.save();
    ctx.set_line_width(1.0 / zoom);
    for major in [false, true] {
        if major {
            ctx.set_source_rgba(0.0, 0.0, 0.0, 0.15);
        } else {
            ctx.set_source_rgba(0.0, 0.0, 0.0, 0.06);
        }
        for line in grid.lines(visible, zoom).iter().filter(|l| l.major == major) {
            match line.axis {
                Axis::Vertical => {
                    ctx.move_to(line.position, visible.y);
                    ctx.line_to(line.position, visible.bottom());
                }
                Axis::Horizontal => {
                    ctx.move_to(visible.x, line.position);
                    ctx.line_to(visible.right(), line.position);
                }
            }
        }
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_hover(ctx: &mut dyn DrawContext, obj: &SceneObject, zoom: f64) {
    let (r, g, b) = SELECTION;
    ctx.save();
    ctx.set_source_rgba(r, g, b, 0.4);
    ctx.set_line_width(1.0 / zoom);
    ctx.rectangle(obj.x, obj.y, obj.width, obj.height);
    ctx.stroke();
    ctx.restore();
}

fn draw_selection(ctx: &mut dyn DrawContext, obj: &SceneObject, zoom: f64) {
    let (r, g, b) = SELECTION;
    let rect = obj.rect();
    ctx.save();
    ctx.set_source_rgba(r, g, b, 1.0);
    ctx.set_line_width(2.0 / zoom);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    ctx.stroke();

    let size = HANDLE_DRAW_SIZE / zoom;
    ctx.set_line_width(1.0 / zoom);
    for handle in ResizeHandle::CORNERS {
        let anchor = handle.anchor(&rect);
        let (hx, hy) = (anchor.x - size / 2.0, anchor.y - size / 2.0);
        ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
        ctx.rectangle(hx, hy, size, size);
        ctx.fill();
        ctx.set_source_rgba(r, g, b, 1.0);
        ctx.rectangle(hx, hy, size, size);
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_rubber_band(ctx: &mut dyn DrawContext, band: &Rect, zoom: f64) {
    let (r, g, b) = SELECTION;
    ctx.save();
    ctx.set_source_rgba(r, g, b, 0.15);
    ctx.rectangle(band.x, band.y, band.width, band.height);
    ctx.fill();
    ctx.set_source_rgba(r, g, b, 0.8);
    ctx.set_line_width(1.0 / zoom);
    ctx.rectangle(band.x, band.y, band.width, band.height);
    ctx.stroke();
    ctx.restore();
}
