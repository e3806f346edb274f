//! Scene object model.
//!
//! Every object on the canvas is a [`SceneObject`]: an axis-aligned box in
//! canvas units plus a z-order and a type-specific [`ObjectKind`] payload.
//! Hit-testing and resize-handle lookup work on the box alone; the payload
//! decides what is drawn inside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use corkboard_core::constants::MIN_OBJECT_SIZE;
use corkboard_core::RecordError;

use crate::renderer::DrawContext;
use crate::spatial_index::Bounds;

mod image;
mod note;
mod text;

pub use self::image::ImageContent;
pub use note::{NoteColor, NoteContent};
pub use text::TextContent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The axis-aligned span between two arbitrary corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Closed containment: points on the border are inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Overlap test; rectangles that merely touch still intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) {:.1}x{:.1}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Stable identity of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// A fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the textual form written by [`ObjectId::to_string`].
    pub fn parse(value: &str) -> Result<Self, RecordError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| RecordError::InvalidId {
                id: value.to_string(),
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parses `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(value: &str) -> Result<Self, RecordError> {
        let invalid = || RecordError::InvalidColor {
            value: value.to_string(),
        };
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Channels scaled to `0.0..=1.0` for drawing backends.
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

/// One of the eight resize anchors on an object's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    NW,
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
}

impl ResizeHandle {
    /// Lookup order for hit-testing: corners before edges.
    pub const LOOKUP_ORDER: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SW,
        ResizeHandle::SE,
        ResizeHandle::N,
        ResizeHandle::S,
        ResizeHandle::E,
        ResizeHandle::W,
    ];

    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SW,
        ResizeHandle::SE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NW => "nw",
            Self::N => "n",
            Self::NE => "ne",
            Self::E => "e",
            Self::SE => "se",
            Self::S => "s",
            Self::SW => "sw",
            Self::W => "w",
        }
    }

    pub fn has_north(&self) -> bool {
        matches!(self, Self::NW | Self::N | Self::NE)
    }

    pub fn has_south(&self) -> bool {
        matches!(self, Self::SW | Self::S | Self::SE)
    }

    pub fn has_east(&self) -> bool {
        matches!(self, Self::NE | Self::E | Self::SE)
    }

    pub fn has_west(&self) -> bool {
        matches!(self, Self::NW | Self::W | Self::SW)
    }

    /// Whether width is the authoritative dimension for aspect-locked resizes.
    ///
    /// True for every handle with an east or west component.
    pub fn drives_width(&self) -> bool {
        self.has_east() || self.has_west()
    }

    /// Anchor point of this handle on `rect`.
    pub fn anchor(&self, rect: &Rect) -> Point {
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        let x = if self.has_west() {
            rect.x
        } else if self.has_east() {
            rect.right()
        } else {
            cx
        };
        let y = if self.has_north() {
            rect.y
        } else if self.has_south() {
            rect.bottom()
        } else {
            cy
        };
        Point::new(x, y)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Note(NoteContent),
    Text(TextContent),
    Image(ImageContent),
}

impl ObjectKind {
    /// Persisted type discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Note(_) => "note",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

/// An object placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i64,
    /// Transient UI flag, never persisted.
    pub selected: bool,
    /// Transient UI flag, never persisted.
    pub hovered: bool,
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Creates an object with a fresh id. Sizes below the minimum are clamped.
    pub fn new(rect: Rect, kind: ObjectKind) -> Self {
        let mut obj = Self {
            id: ObjectId::new(),
            x: 0.0,
            y: 0.0,
            width: MIN_OBJECT_SIZE,
            height: MIN_OBJECT_SIZE,
            z_index: 0,
            selected: false,
            hovered: false,
            kind,
        };
        obj.set_rect(rect);
        obj
    }

    pub fn note(rect: Rect, content: NoteContent) -> Self {
        Self::new(rect, ObjectKind::Note(content))
    }

    pub fn text(rect: Rect, content: TextContent) -> Self {
        Self::new(rect, ObjectKind::Text(content))
    }

    pub fn image(rect: Rect, content: ImageContent) -> Self {
        Self::new(rect, ObjectKind::Image(content))
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        self.rect().to_bounds()
    }

    /// Replaces position and size. Non-positive or tiny sizes are clamped
    /// to the minimum object size.
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = clamp_size(rect.width);
        self.height = clamp_size(rect.height);
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.rect().contains_point(x, y)
    }

    pub fn intersects(&self, rect: &Rect) -> bool {
        self.rect().intersects(rect)
    }

    /// Returns the resize handle within `handle_size` of `(x, y)`.
    ///
    /// Only selected objects expose handles. Corners win over edges.
    pub fn get_resize_handle(&self, x: f64, y: f64, handle_size: f64) -> Option<ResizeHandle> {
        if !self.selected {
            return None;
        }
        let rect = self.rect();
        ResizeHandle::LOOKUP_ORDER.into_iter().find(|handle| {
            let anchor = handle.anchor(&rect);
            (x - anchor.x).abs() <= handle_size && (y - anchor.y).abs() <= handle_size
        })
    }

    /// Natural width/height ratio for objects that must keep it on resize.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match &self.kind {
            ObjectKind::Image(image) => image.aspect_ratio(),
            _ => None,
        }
    }

    /// Text shown for editing, for objects that carry editable text.
    pub fn editable_text(&self) -> Option<&str> {
        match &self.kind {
            ObjectKind::Note(note) => Some(&note.text),
            ObjectKind::Text(text) => Some(&text.text),
            ObjectKind::Image(_) => None,
        }
    }

    /// Replaces the editable text. Returns `false` for objects without text.
    pub fn set_text(&mut self, value: &str) -> bool {
        match &mut self.kind {
            ObjectKind::Note(note) => {
                note.text = value.to_string();
                true
            }
            ObjectKind::Text(text) => {
                text.text = value.to_string();
                true
            }
            ObjectKind::Image(_) => false,
        }
    }

    pub fn as_note(&self) -> Option<&NoteContent> {
        match &self.kind {
            ObjectKind::Note(note) => Some(note),
            _ => None,
        }
    }

    pub fn as_note_mut(&mut self) -> Option<&mut NoteContent> {
        match &mut self.kind {
            ObjectKind::Note(note) => Some(note),
            _ => None,
        }
    }

    /// Clone with a fresh identity, shifted by `offset` on both axes.
    pub fn duplicate(&self, offset: f64) -> SceneObject {
        let mut copy = self.clone();
        copy.id = ObjectId::new();
        copy.x += offset;
        copy.y += offset;
        copy.selected = false;
        copy.hovered = false;
        copy
    }

    /// Draws the object's content into its bounding box, in canvas units.
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        let rect = self.rect();
        match &self.kind {
            ObjectKind::Note(note) => note.render(ctx, &rect),
            ObjectKind::Text(text) => text.render(ctx, &rect),
            ObjectKind::Image(image) => image.render(ctx, &rect),
        }
    }
}

fn clamp_size(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_OBJECT_SIZE)
    } else {
        MIN_OBJECT_SIZE
    }
}
