//! Sticky note content.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Rect, Rgb};
use crate::renderer::DrawContext;
use crate::text_layout::{draw_wrapped_text, WrapCache};

const NOTE_FONT_FAMILY: &str = "Sans";
const SHADOW_OFFSET: f64 = 3.0;

/// The fixed note palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    #[default]
    Yellow,
    Orange,
    Blue,
    Green,
    Purple,
}

impl NoteColor {
    pub const ALL: [NoteColor; 5] = [
        NoteColor::Yellow,
        NoteColor::Orange,
        NoteColor::Blue,
        NoteColor::Green,
        NoteColor::Purple,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }

    pub fn rgb(&self) -> Rgb {
        match self {
            Self::Yellow => Rgb::new(255, 235, 59),
            Self::Orange => Rgb::new(255, 153, 0),
            Self::Blue => Rgb::new(128, 179, 255),
            Self::Green => Rgb::new(128, 230, 128),
            Self::Purple => Rgb::new(179, 128, 255),
        }
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text on a colored square.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteContent {
    pub text: String,
    pub color_name: NoteColor,
    /// Fill color; tracks `color_name` through [`NoteContent::set_color`].
    pub color: Rgb,
    pub font_size: f64,
    pub padding: f64,
    wrap_cache: WrapCache,
}

impl NoteContent {
    pub fn new(text: impl Into<String>, color: NoteColor, font_size: f64, padding: f64) -> Self {
        Self {
            text: text.into(),
            color_name: color,
            color: color.rgb(),
            font_size,
            padding,
            wrap_cache: WrapCache::new(),
        }
    }

    pub fn set_color(&mut self, color: NoteColor) {
        self.color_name = color;
        self.color = color.rgb();
    }

    pub fn wrap_cache(&self) -> &WrapCache {
        &self.wrap_cache
    }

    pub(crate) fn render(&self, ctx: &mut dyn DrawContext, rect: &Rect) {
        ctx.save();

        ctx.set_source_rgba(0.0, 0.0, 0.0, 0.2);
        ctx.rectangle(
            rect.x + SHADOW_OFFSET,
            rect.y + SHADOW_OFFSET,
            rect.width,
            rect.height,
        );
        ctx.fill();

        let (r, g, b) = self.color.to_unit();
        ctx.set_source_rgba(r, g, b, 1.0);
        ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        ctx.fill();

        ctx.set_source_rgba(0.0, 0.0, 0.0, 0.3);
        ctx.set_line_width(1.0);
        ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        ctx.stroke();

        ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
        draw_wrapped_text(
            ctx,
            &self.wrap_cache,
            &self.text,
            NOTE_FONT_FAMILY,
            self.font_size,
            self.padding,
            rect,
        );

        ctx.restore();
    }
}
