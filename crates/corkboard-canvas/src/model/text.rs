//! Free-standing text block content.

use crate::model::{Rect, Rgb};
use crate::renderer::DrawContext;
use crate::text_layout::{draw_wrapped_text, WrapCache};

#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub color: Rgb,
    pub padding: f64,
    wrap_cache: WrapCache,
}

impl TextContent {
    pub fn new(
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
        color: Rgb,
        padding: f64,
    ) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            color,
            padding,
            wrap_cache: WrapCache::new(),
        }
    }

    pub fn wrap_cache(&self) -> &WrapCache {
        &self.wrap_cache
    }

    pub(crate) fn render(&self, ctx: &mut dyn DrawContext, rect: &Rect) {
        ctx.save();
        let (r, g, b) = self.color.to_unit();
        ctx.set_source_rgba(r, g, b, 1.0);
        draw_wrapped_text(
            ctx,
            &self.wrap_cache,
            &self.text,
            &self.font_family,
            self.font_size,
            self.padding,
            rect,
        );
        ctx.restore();
    }
}
