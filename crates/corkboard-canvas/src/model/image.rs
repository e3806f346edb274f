//! Image content backed by a file on disk.

use std::cell::Cell;
use std::path::Path;

use tracing::{debug, warn};

use corkboard_core::AssetError;

use crate::model::Rect;
use crate::renderer::DrawContext;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    /// Fully resolved path of the backing image file.
    pub asset_reference: String,
    /// Natural size of the image, used for aspect-locked resizing.
    pub original_width: f64,
    pub original_height: f64,
    available: bool,
    // Set after the first failed draw; the asset is not retried.
    draw_failed: Cell<bool>,
}

impl ImageContent {
    /// Wraps an asset reference with known natural dimensions.
    ///
    /// The file is probed once; a missing file renders as a placeholder.
    pub fn new(asset_reference: impl Into<String>, original_width: f64, original_height: f64) -> Self {
        let asset_reference = asset_reference.into();
        let available = Path::new(&asset_reference).is_file();
        if !available {
            warn!("Image asset not found: {}", asset_reference);
        }
        Self {
            asset_reference,
            original_width,
            original_height,
            available,
            draw_failed: Cell::new(false),
        }
    }

    /// Reads the natural dimensions of an image file.
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        if !path.is_file() {
            return Err(AssetError::NotFound {
                path: path.display().to_string(),
            });
        }
        let (width, height) = image::image_dimensions(path).map_err(|e| AssetError::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            asset_reference: path.display().to_string(),
            original_width: f64::from(width),
            original_height: f64::from(height),
            available: true,
            draw_failed: Cell::new(false),
        })
    }

    /// Whether the backing file existed when the content was created.
    pub fn is_available(&self) -> bool {
        self.available && !self.draw_failed.get()
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.original_width > 0.0 && self.original_height > 0.0 {
            Some(self.original_width / self.original_height)
        } else {
            None
        }
    }

    pub(crate) fn render(&self, ctx: &mut dyn DrawContext, rect: &Rect) {
        if self.is_available() {
            match ctx.draw_image(Path::new(&self.asset_reference), rect) {
                Ok(()) => return,
                Err(e) => {
                    debug!("Falling back to placeholder: {}", e);
                    self.draw_failed.set(true);
                }
            }
        }
        draw_placeholder(ctx, rect);
    }
}

/// Neutral fill, border and a diagonal cross.
fn draw_placeholder(ctx: &mut dyn DrawContext, rect: &Rect) {
    ctx.save();
    ctx.set_source_rgba(0.85, 0.85, 0.85, 1.0);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    ctx.fill();

    ctx.set_source_rgba(0.5, 0.5, 0.5, 1.0);
    ctx.set_line_width(2.0);
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
    ctx.stroke();

    ctx.move_to(rect.x, rect.y);
    ctx.line_to(rect.right(), rect.bottom());
    ctx.move_to(rect.right(), rect.y);
    ctx.line_to(rect.x, rect.bottom());
    ctx.stroke();
    ctx.restore();
}
