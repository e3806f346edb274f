//! Word wrapping with a single-entry cache.
//!
//! Notes and text blocks re-render every frame but their text rarely
//! changes, so the last wrap is kept and reused until the text, the
//! available width, or the font size differ.

use std::cell::{Cell, Ref, RefCell};

use crate::model::Rect;
use crate::renderer::DrawContext;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.5;

#[derive(Debug, Clone)]
struct WrapEntry {
    text: String,
    max_width: f64,
    font_size: f64,
    lines: Vec<String>,
}

/// Cached result of the last [`wrap_text`] call for one object.
///
/// The cache is transient render state: it compares equal to any other
/// cache and is reset on clone.
#[derive(Debug, Default)]
pub struct WrapCache {
    entry: RefCell<Option<WrapEntry>>,
    computations: Cell<usize>,
}

impl WrapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wrapped lines, recomputing only when the key changed.
    pub fn lines<F>(&self, text: &str, max_width: f64, font_size: f64, measure: F) -> Ref<'_, [String]>
    where
        F: Fn(&str) -> f64,
    {
        let stale = match &*self.entry.borrow() {
            Some(entry) => {
                entry.text != text || entry.max_width != max_width || entry.font_size != font_size
            }
            None => true,
        };
        if stale {
            let lines = wrap_text(text, max_width, measure);
            self.computations.set(self.computations.get() + 1);
            *self.entry.borrow_mut() = Some(WrapEntry {
                text: text.to_string(),
                max_width,
                font_size,
                lines,
            });
        }
        Ref::map(self.entry.borrow(), |entry| match entry {
            Some(entry) => entry.lines.as_slice(),
            None => &[],
        })
    }

    /// Number of times the wrap has actually been computed.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }

    pub fn invalidate(&self) {
        *self.entry.borrow_mut() = None;
    }
}

impl Clone for WrapCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for WrapCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. A single word wider than `max_width`
/// gets a line of its own rather than being split.
pub fn wrap_text<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if measure(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

/// Draws `text` wrapped inside `rect` minus `padding`, using the current
/// source color. Lines that would start below the padded box are dropped.
pub fn draw_wrapped_text(
    ctx: &mut dyn DrawContext,
    cache: &WrapCache,
    text: &str,
    font_family: &str,
    font_size: f64,
    padding: f64,
    rect: &Rect,
) {
    ctx.select_font(font_family, font_size);
    let available = (rect.width - 2.0 * padding).max(0.0);
    let lines: Vec<String> = {
        let measure = |s: &str| ctx.text_width(s);
        cache.lines(text, available, font_size, measure).to_vec()
    };

    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let limit = rect.bottom() - padding;
    for (i, line) in lines.iter().enumerate() {
        let top = rect.y + padding + i as f64 * line_height;
        if top > limit {
            break;
        }
        ctx.show_text(rect.x + padding, top + font_size, line);
    }
}
