//! # Corkboard
//!
//! An infinite canvas for sticky notes, free text and images, with pan,
//! zoom, rubber-band selection, resize handles and full undo/redo.
//!
//! ## Architecture
//!
//! Corkboard is organized as a workspace with multiple crates:
//!
//! 1. **corkboard-core** - Shared errors, constants and callback aliases
//! 2. **corkboard-settings** - Canvas configuration and its file formats
//! 3. **corkboard-canvas** - Viewport, spatial index, objects, commands,
//!    gestures, rendering and board files
//! 4. **corkboard** - This crate: logging setup and the command-line harness

use std::collections::BTreeMap;
use std::fmt;

pub use corkboard_canvas as canvas;
pub use corkboard_settings as settings;

pub use corkboard_canvas::{
    BoardFile, InteractionController, LoadReport, Rect, SceneDocument, Viewport,
};
pub use corkboard_core::{Error, Result};
pub use corkboard_settings::CanvasConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Overview of an open board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    /// Object count per type name.
    pub counts: BTreeMap<&'static str, usize>,
    /// Bounding box of all content.
    pub bounds: Option<Rect>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl BoardSummary {
    pub fn from_document(document: &SceneDocument) -> Self {
        let mut counts = BTreeMap::new();
        for obj in document.objects() {
            *counts.entry(obj.type_name()).or_insert(0) += 1;
        }
        Self {
            counts,
            bounds: document.scene().content_bounds(),
            can_undo: document.can_undo(),
            can_redo: document.can_redo(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} objects", self.total())?;
        if !self.counts.is_empty() {
            let parts: Vec<String> = self
                .counts
                .iter()
                .map(|(kind, count)| format!("{} {}", count, kind))
                .collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        match &self.bounds {
            Some(bounds) => write!(f, ", bounds {}", bounds)?,
            None => write!(f, ", empty")?,
        }
        write!(
            f,
            ", undo {}, redo {}",
            if self.can_undo { "available" } else { "unavailable" },
            if self.can_redo { "available" } else { "unavailable" }
        )
    }
}
