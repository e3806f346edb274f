//! Pointer and keyboard handling.
//!
//! [`InteractionController`] turns raw input into viewport changes,
//! selection changes and recorded commands. It owns the document, the
//! viewport and the grid, and tracks one gesture at a time.
//!
//! Host contract:
//! - `drag_begin` / `drag_update` / `drag_end` for press-move-release
//!   cycles, with absolute screen positions. `cancel_gesture` when the
//!   gesture is interrupted (focus loss, grab broken).
//! - `click` for press-release without motion, with the press count.
//! - `pointer_motion` / `pointer_leave` for hover tracking.
//! - `take_redraw_request` after each event to decide whether to repaint.

use std::path::Path;

use tracing::debug;

use corkboard_core::AssetError;
use corkboard_settings::{CanvasConfig, InteractionSettings};

use crate::commands::{MoveObjects, ResizeObject, SceneCommand};
use crate::document::SceneDocument;
use crate::grid::Grid;
use crate::model::{NoteColor, ObjectId, Point, Rect, ResizeHandle};
use crate::renderer::{render_scene, DrawContext, Frame};
use crate::viewport::Viewport;

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Char(char),
}

/// Pointer shape the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
    Crosshair,
    Resize(ResizeHandle),
}

/// Result of a discrete click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Selection was updated (possibly unchanged).
    Selection,
    /// A double-click hit an object with editable text; the host should
    /// open its text editor and report back through
    /// [`SceneDocument::commit_text_edit`].
    EditText(ObjectId),
}

/// One in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureState {
    Idle,
    Panning {
        last: Point,
    },
    DraggingObjects {
        /// Canvas position of the press.
        start: Point,
        /// Object under the press; its snapped position drives the group.
        grabbed: ObjectId,
        /// Origins of every selected object at press time.
        snapshots: Vec<(ObjectId, f64, f64)>,
        /// Last applied common delta.
        delta: (f64, f64),
    },
    Resizing {
        id: ObjectId,
        handle: ResizeHandle,
        original: Rect,
    },
    RubberBand {
        anchor: Point,
        current: Point,
        additive: bool,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingObjects { .. } => "dragging-objects",
            Self::Resizing { .. } => "resizing",
            Self::RubberBand { .. } => "rubber-band-selecting",
        }
    }
}

pub struct InteractionController {
    document: SceneDocument,
    viewport: Viewport,
    grid: Grid,
    settings: InteractionSettings,
    zoom_step: f64,
    scroll_zoom_factor: f64,
    state: GestureState,
    screen_width: f64,
    screen_height: f64,
    redraw: bool,
}

impl InteractionController {
    pub fn new(config: &CanvasConfig) -> Self {
        Self::with_document(SceneDocument::with_config(config), config)
    }

    pub fn with_document(document: SceneDocument, config: &CanvasConfig) -> Self {
        Self {
            document,
            viewport: Viewport::from_settings(&config.viewport),
            grid: Grid::from_settings(&config.grid),
            settings: config.interaction.clone(),
            zoom_step: config.viewport.zoom_step,
            scroll_zoom_factor: config.viewport.scroll_zoom_factor,
            state: GestureState::Idle,
            screen_width: 0.0,
            screen_height: 0.0,
            redraw: false,
        }
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SceneDocument {
        &mut self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_width = width;
        self.screen_height = height;
        self.request_redraw();
    }

    pub fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Returns whether a repaint was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Canvas point at the center of the screen.
    pub fn screen_center(&self) -> Point {
        self.viewport
            .screen_to_canvas(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Rubber-band rectangle of the current gesture, in canvas units.
    pub fn rubber_band(&self) -> Option<Rect> {
        match &self.state {
            GestureState::RubberBand {
                anchor, current, ..
            } => Some(Rect::from_corners(*anchor, *current)),
            _ => None,
        }
    }

    // ---------------------------------------------------------------------
    // Gestures
    // ---------------------------------------------------------------------

    /// Starts a gesture at screen position `(sx, sy)`.
    ///
    /// An unfinished gesture is ended first.
    pub fn drag_begin(&mut self, sx: f64, sy: f64, modifiers: Modifiers) {
        if self.state != GestureState::Idle {
            self.cancel_gesture();
        }
        let point = self.viewport.screen_to_canvas(sx, sy);

        if let Some((id, handle, original)) = self.handle_at(point) {
            self.state = GestureState::Resizing {
                id,
                handle,
                original,
            };
        } else if let Some(id) = self.document.scene().hit_test(point) {
            let scene = self.document.scene_mut();
            if !scene.selection().contains(id) {
                scene.select_only(id);
            }
            let snapshots = scene
                .objects()
                .iter()
                .filter(|obj| obj.selected)
                .map(|obj| (obj.id, obj.x, obj.y))
                .collect();
            self.state = GestureState::DraggingObjects {
                start: point,
                grabbed: id,
                snapshots,
                delta: (0.0, 0.0),
            };
        } else if modifiers.shift {
            self.state = GestureState::RubberBand {
                anchor: point,
                current: point,
                additive: modifiers.ctrl,
            };
        } else {
            self.state = GestureState::Panning {
                last: Point::new(sx, sy),
            };
        }
        debug!("Gesture begin: {}", self.state.name());
        self.request_redraw();
    }

    /// Topmost selected object exposing a resize handle at `point`.
    fn handle_at(&self, point: Point) -> Option<(ObjectId, ResizeHandle, Rect)> {
        let tolerance = self.settings.handle_size / self.viewport.zoom();
        let mut selected = self.document.scene().selected_by_z();
        selected.reverse();
        selected.into_iter().find_map(|obj| {
            obj.get_resize_handle(point.x, point.y, tolerance)
                .map(|handle| (obj.id, handle, obj.rect()))
        })
    }

    /// Advances the gesture to screen position `(sx, sy)`.
    pub fn drag_update(&mut self, sx: f64, sy: f64) {
        let point = self.viewport.screen_to_canvas(sx, sy);
        match &mut self.state {
            GestureState::Idle => return,
            GestureState::Panning { last } => {
                let (dx, dy) = (sx - last.x, sy - last.y);
                *last = Point::new(sx, sy);
                self.viewport.pan(dx, dy);
            }
            GestureState::DraggingObjects {
                start,
                grabbed,
                snapshots,
                delta,
            } => {
                let mut dx = point.x - start.x;
                let mut dy = point.y - start.y;
                if self.grid.snap_enabled {
                    if let Some((_, gx, gy)) = snapshots.iter().find(|(id, _, _)| id == grabbed) {
                        let target = self.grid.snap_point(Point::new(gx + dx, gy + dy));
                        dx = target.x - gx;
                        dy = target.y - gy;
                    }
                }
                *delta = (dx, dy);
                let scene = self.document.scene_mut();
                for (id, x0, y0) in snapshots.iter() {
                    if let Some(obj) = scene.get_mut(*id) {
                        obj.move_to(x0 + dx, y0 + dy);
                        scene.refresh(*id);
                    }
                }
            }
            GestureState::Resizing {
                id,
                handle,
                original,
            } => {
                let id = *id;
                let scene = self.document.scene_mut();
                let aspect = scene.get(id).and_then(|obj| obj.aspect_ratio());
                let rect = compute_resize(
                    original,
                    *handle,
                    point,
                    self.settings.min_resize_size,
                    aspect,
                    &self.grid,
                );
                if let Some(obj) = scene.get_mut(id) {
                    obj.set_rect(rect);
                    scene.refresh(id);
                }
            }
            GestureState::RubberBand { current, .. } => {
                *current = point;
            }
        }
        self.request_redraw();
    }

    /// Finishes the gesture at screen position `(sx, sy)`, committing any
    /// change as a single command.
    pub fn drag_end(&mut self, sx: f64, sy: f64) {
        if self.state == GestureState::Idle {
            return;
        }
        self.drag_update(sx, sy);
        self.finish_gesture();
    }

    /// Ends an interrupted gesture. Live changes made so far are kept and
    /// recorded exactly as on a normal release.
    pub fn cancel_gesture(&mut self) {
        if self.state != GestureState::Idle {
            debug!("Gesture interrupted: {}", self.state.name());
            self.finish_gesture();
        }
    }

    fn finish_gesture(&mut self) {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Idle | GestureState::Panning { .. } => {}
            GestureState::DraggingObjects {
                snapshots,
                delta: (dx, dy),
                ..
            } => {
                let scene = self.document.scene();
                let origins: Vec<(ObjectId, f64, f64)> = snapshots
                    .into_iter()
                    .filter(|(id, x0, y0)| {
                        scene
                            .get(*id)
                            .is_some_and(|obj| obj.x != *x0 || obj.y != *y0)
                    })
                    .collect();
                if !origins.is_empty() {
                    debug!("Moved {} objects by ({:.2}, {:.2})", origins.len(), dx, dy);
                    self.document
                        .push_done(SceneCommand::MoveObjects(MoveObjects { origins, dx, dy }));
                }
            }
            GestureState::Resizing { id, original, .. } => {
                if let Some(current) = self.document.get(id).map(|obj| obj.rect()) {
                    self.document.scene_mut().refresh(id);
                    if current != original {
                        self.document
                            .push_done(SceneCommand::ResizeObject(ResizeObject {
                                id,
                                old: original,
                                new: current,
                            }));
                    }
                }
            }
            GestureState::RubberBand {
                anchor,
                current,
                additive,
            } => {
                let rect = Rect::from_corners(anchor, current);
                let scene = self.document.scene_mut();
                let hits = scene.query_rect(&rect);
                if !additive {
                    scene.clear_selection();
                }
                scene.extend_selection(hits);
            }
        }
        self.request_redraw();
    }

    /// Resolves a press-release without motion.
    pub fn click(&mut self, sx: f64, sy: f64, n_press: u32, modifiers: Modifiers) -> ClickOutcome {
        let point = self.viewport.screen_to_canvas(sx, sy);
        let hit = self.document.scene().hit_test(point);
        self.request_redraw();

        if n_press >= 2 {
            if let Some(id) = hit {
                if self.document.get(id).and_then(|obj| obj.editable_text()).is_some() {
                    return ClickOutcome::EditText(id);
                }
            }
        }

        let scene = self.document.scene_mut();
        match hit {
            Some(id) if modifiers.ctrl => scene.toggle_selection(id),
            Some(id) => {
                if !scene.selection().is_sole(id) {
                    scene.select_only(id);
                }
            }
            None if !modifiers.ctrl => scene.clear_selection(),
            None => {}
        }
        ClickOutcome::Selection
    }

    // ---------------------------------------------------------------------
    // Hover, scroll, keys
    // ---------------------------------------------------------------------

    /// Tracks hover and reports the cursor to show.
    pub fn pointer_motion(&mut self, sx: f64, sy: f64) -> CursorHint {
        match &self.state {
            GestureState::Panning { .. } | GestureState::DraggingObjects { .. } => {
                return CursorHint::Grabbing
            }
            GestureState::Resizing { handle, .. } => return CursorHint::Resize(*handle),
            GestureState::RubberBand { .. } => return CursorHint::Crosshair,
            GestureState::Idle => {}
        }
        let point = self.viewport.screen_to_canvas(sx, sy);
        let handle = self.handle_at(point);
        let hit = self.document.scene().hit_test(point);
        if self.document.scene_mut().set_hovered(hit) {
            self.request_redraw();
        }
        match (handle, hit) {
            (Some((_, handle, _)), _) => CursorHint::Resize(handle),
            (None, Some(_)) => CursorHint::Grab,
            (None, None) => CursorHint::Default,
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.document.scene_mut().set_hovered(None) {
            self.request_redraw();
        }
    }

    /// Wheel zoom anchored at the cursor. Negative `dy` zooms in.
    pub fn scroll(&mut self, sx: f64, sy: f64, dy: f64) -> bool {
        let factor = if dy < 0.0 {
            self.scroll_zoom_factor
        } else if dy > 0.0 {
            1.0 / self.scroll_zoom_factor
        } else {
            return false;
        };
        let changed = self.viewport.zoom_at(sx, sy, factor);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Handles a key press. Returns whether the key was consumed.
    pub fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let handled = match key {
            Key::Delete | Key::Backspace => {
                self.document.delete_selection();
                true
            }
            Key::Char(c) if modifiers.ctrl => match c.to_ascii_lowercase() {
                'd' => {
                    self.document.duplicate_selection();
                    true
                }
                'z' if modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => false,
            },
            Key::Char(_) => false,
        };
        if handled {
            self.request_redraw();
        }
        handled
    }

    // ---------------------------------------------------------------------
    // Toolbar entry points
    // ---------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / self.zoom_step);
    }

    fn zoom_by(&mut self, factor: f64) {
        let center = (self.screen_width / 2.0, self.screen_height / 2.0);
        self.viewport
            .set_zoom(self.viewport.zoom() * factor, Some(center));
        self.request_redraw();
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.grid.visible = !self.grid.visible;
        self.request_redraw();
        self.grid.visible
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.grid.snap_enabled = !self.grid.snap_enabled;
        self.grid.snap_enabled
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let changed = self.document.undo();
        self.request_redraw();
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        let changed = self.document.redo();
        self.request_redraw();
        changed
    }

    pub fn add_note(&mut self) -> ObjectId {
        let center = self.screen_center();
        self.request_redraw();
        self.document.add_note(center)
    }

    pub fn add_text(&mut self) -> ObjectId {
        let center = self.screen_center();
        self.request_redraw();
        self.document.add_text(center)
    }

    pub fn add_image(&mut self, path: &Path) -> Result<ObjectId, AssetError> {
        let center = self.screen_center();
        let id = self.document.add_image(path, center)?;
        self.request_redraw();
        Ok(id)
    }

    pub fn delete_selection(&mut self) -> usize {
        self.request_redraw();
        self.document.delete_selection()
    }

    pub fn duplicate_selection(&mut self) -> Vec<ObjectId> {
        self.request_redraw();
        self.document.duplicate_selection()
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.request_redraw();
        self.document.bring_to_front()
    }

    pub fn send_to_back(&mut self) -> bool {
        self.request_redraw();
        self.document.send_to_back()
    }

    pub fn change_note_color(&mut self, id: ObjectId, color: NoteColor) -> bool {
        self.request_redraw();
        self.document.change_note_color(id, color)
    }

    /// Clears the board, its history and the view.
    pub fn new_board(&mut self) {
        self.state = GestureState::Idle;
        self.document.clear();
        self.viewport.reset();
        self.request_redraw();
    }

    /// Draws the current frame.
    pub fn render(&self, ctx: &mut dyn DrawContext) -> usize {
        let frame = Frame {
            scene: self.document.scene(),
            viewport: &self.viewport,
            grid: &self.grid,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            rubber_band: self.rubber_band(),
        };
        render_scene(ctx, &frame)
    }
}

/// New bounds for a resize of `original` by dragging `handle` to `cursor`.
///
/// Steps, in order:
/// 1. The dragged edges follow the cursor; the opposite edges stay put.
/// 2. With snapping, position and size are rounded to the grid.
/// 3. Width and height are floored at `min_size`.
/// 4. With an aspect ratio, the drag-axis dimension (width for any handle
///    with an east or west part) is kept and the other derived from it. If
///    the derived side falls under the floor it is raised to the floor and
///    the drag-axis side re-derived, so the ratio holds exactly.
pub fn compute_resize(
    original: &Rect,
    handle: ResizeHandle,
    cursor: Point,
    min_size: f64,
    aspect: Option<f64>,
    grid: &Grid,
) -> Rect {
    let mut x = original.x;
    let mut y = original.y;
    let mut width = original.width;
    let mut height = original.height;

    if handle.has_east() {
        width = cursor.x - original.x;
    } else if handle.has_west() {
        width = original.right() - cursor.x;
        x = cursor.x;
    }
    if handle.has_south() {
        height = cursor.y - original.y;
    } else if handle.has_north() {
        height = original.bottom() - cursor.y;
        y = cursor.y;
    }

    if grid.snap_enabled {
        x = grid.snap(x);
        y = grid.snap(y);
        if aspect.is_none() || handle.drives_width() {
            width = grid.snap_size(width);
        }
        if aspect.is_none() || !handle.drives_width() {
            height = grid.snap_size(height);
        }
    }

    if width < min_size {
        width = min_size;
        if handle.has_west() {
            x = original.right() - min_size;
        }
    }
    if height < min_size {
        height = min_size;
        if handle.has_north() {
            y = original.bottom() - min_size;
        }
    }

    if let Some(ratio) = aspect {
        if handle.drives_width() {
            height = width / ratio;
            if height < min_size {
                height = min_size;
                width = height * ratio;
            }
        } else {
            width = height * ratio;
            if width < min_size {
                width = min_size;
                height = width / ratio;
            }
        }
        // Keep the edge opposite the handle anchored.
        if handle.has_west() {
            x = original.right() - width;
        }
        if handle.has_north() {
            y = original.bottom() - height;
        }
    }

    Rect::new(x, y, width, height)
}
