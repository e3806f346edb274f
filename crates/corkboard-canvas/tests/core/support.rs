//! Shared fixtures for the core tests.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use corkboard_canvas::{
    DrawContext, ImageContent, NoteColor, NoteContent, Rect, Rgb, SceneObject, TextContent,
};
use corkboard_core::AssetError;

pub fn note_at(x: f64, y: f64, width: f64, height: f64) -> SceneObject {
    SceneObject::note(
        Rect::new(x, y, width, height),
        NoteContent::new("note", NoteColor::Yellow, 14.0, 10.0),
    )
}

pub fn labeled_note(x: f64, y: f64, label: &str, z_index: i64) -> SceneObject {
    SceneObject::note(
        Rect::new(x, y, 100.0, 100.0),
        NoteContent::new(label, NoteColor::Blue, 14.0, 10.0),
    )
    .with_z_index(z_index)
}

pub fn text_at(x: f64, y: f64) -> SceneObject {
    SceneObject::text(
        Rect::new(x, y, 300.0, 50.0),
        TextContent::new("text", "Sans", 16.0, Rgb::BLACK, 5.0),
    )
}

/// Image object whose asset does not exist on disk.
pub fn image_at(x: f64, y: f64, width: f64, height: f64) -> SceneObject {
    SceneObject::image(
        Rect::new(x, y, width, height),
        ImageContent::new("/nonexistent/corkboard/photo.png", width, height),
    )
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64, f64),
    Source(f64, f64, f64, f64),
    LineWidth(f64),
    Rectangle(f64, f64, f64, f64),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Fill,
    Stroke,
    Font(String, f64),
    Text(String),
    Image(PathBuf),
}

/// Draw context that records every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    pub fail_images: bool,
    font_size: Cell<f64>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_images() -> Self {
        Self {
            fail_images: true,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl DrawContext for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(Op::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(Op::Scale(sx, sy));
    }

    fn set_source_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) {
        self.ops.push(Op::Source(r, g, b, a));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Rectangle(x, y, width, height));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn select_font(&mut self, family: &str, size: f64) {
        self.font_size.set(size);
        self.ops.push(Op::Font(family.to_string(), size));
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size.get() * 0.5
    }

    fn show_text(&mut self, _x: f64, _y: f64, text: &str) {
        self.ops.push(Op::Text(text.to_string()));
    }

    fn draw_image(&mut self, path: &Path, _rect: &Rect) -> Result<(), AssetError> {
        self.ops.push(Op::Image(path.to_path_buf()));
        if self.fail_images {
            Err(AssetError::Decode {
                path: path.display().to_string(),
                reason: "unsupported".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
