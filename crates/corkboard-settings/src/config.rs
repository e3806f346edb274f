//! Configuration management for the Corkboard canvas
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Viewport limits and zoom steps
//! - Spatial index tuning
//! - Grid display and snapping
//! - Undo history depth
//! - Interaction tolerances (handles, minimum sizes)
//! - Defaults for newly created objects

use crate::error::{SettingsError, SettingsResult};
use corkboard_core::constants;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "corkboard";

/// File name of the canvas configuration.
const CONFIG_FILE_NAME: &str = "canvas.toml";

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest allowed zoom factor
    pub min_zoom: f64,
    /// Largest allowed zoom factor
    pub max_zoom: f64,
    /// Factor applied by toolbar zoom in/out
    pub zoom_step: f64,
    /// Factor applied per scroll-wheel notch
    pub scroll_zoom_factor: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: constants::MIN_ZOOM,
            max_zoom: constants::MAX_ZOOM,
            zoom_step: constants::ZOOM_STEP,
            scroll_zoom_factor: constants::SCROLL_ZOOM_FACTOR,
        }
    }
}

/// Spatial index settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Edge length of one grid cell in canvas units
    pub cell_size: f64,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            cell_size: constants::SPATIAL_CELL_SIZE,
        }
    }
}

/// Grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid pitch in canvas units
    pub size: f64,
    /// Every n-th line is a major line
    pub major_interval: u32,
    /// Whether the grid is drawn at startup
    pub visible: bool,
    /// Whether snapping is enabled at startup
    pub snap: bool,
    /// Minor lines are skipped below this on-screen cell size
    pub min_cell_pixels: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: constants::GRID_SIZE,
            major_interval: constants::GRID_MAJOR_INTERVAL,
            visible: false,
            snap: false,
            min_cell_pixels: constants::GRID_MIN_CELL_PIXELS,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable commands
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: constants::UNDO_DEPTH,
        }
    }
}

/// Interaction tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Hit radius around each resize handle anchor
    pub handle_size: f64,
    /// Floor applied during interactive resize gestures
    pub min_resize_size: f64,
    /// Offset applied to duplicated objects
    pub duplicate_offset: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            handle_size: constants::HANDLE_SIZE,
            min_resize_size: constants::MIN_RESIZE_SIZE,
            duplicate_offset: constants::DUPLICATE_OFFSET,
        }
    }
}

/// Defaults for newly created objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDefaults {
    pub note_width: f64,
    pub note_height: f64,
    pub note_font_size: f64,
    pub note_padding: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub text_font_size: f64,
    pub text_font_family: String,
    pub text_padding: f64,
    /// Images wider than this are scaled down on add
    pub image_max_width: f64,
}

impl Default for ObjectDefaults {
    fn default() -> Self {
        Self {
            note_width: 200.0,
            note_height: 200.0,
            note_font_size: 14.0,
            note_padding: 10.0,
            text_width: 300.0,
            text_height: 50.0,
            text_font_size: 16.0,
            text_font_family: "Sans".to_string(),
            text_padding: 5.0,
            image_max_width: 300.0,
        }
    }
}

/// Complete canvas configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections or keys fall back to their defaults on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CanvasConfig {
    pub viewport: ViewportSettings,
    pub index: IndexSettings,
    pub grid: GridSettings,
    pub history: HistorySettings,
    pub interaction: InteractionSettings,
    pub objects: ObjectDefaults,
}

impl CanvasConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for Corkboard.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Default location of the canvas configuration file.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults on any failure.
    ///
    /// A missing file is silent; unreadable or invalid files are logged.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No canvas config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring canvas config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // NaN slips past every ordered comparison below.
        for (key, value) in self.float_settings() {
            if !value.is_finite() {
                return Err(SettingsError::invalid(key, "must be a finite number"));
            }
        }

        let v = &self.viewport;
        if v.min_zoom <= 0.0 {
            return Err(SettingsError::invalid("viewport.min_zoom", "must be > 0"));
        }
        if v.min_zoom >= v.max_zoom {
            return Err(SettingsError::invalid(
                "viewport.max_zoom",
                "must be greater than min_zoom",
            ));
        }
        if v.zoom_step <= 1.0 {
            return Err(SettingsError::invalid("viewport.zoom_step", "must be > 1"));
        }
        if v.scroll_zoom_factor <= 1.0 {
            return Err(SettingsError::invalid(
                "viewport.scroll_zoom_factor",
                "must be > 1",
            ));
        }

        if self.index.cell_size <= 0.0 {
            return Err(SettingsError::invalid("index.cell_size", "must be > 0"));
        }

        if self.grid.size <= 0.0 {
            return Err(SettingsError::invalid("grid.size", "must be > 0"));
        }
        if self.grid.major_interval == 0 {
            return Err(SettingsError::invalid("grid.major_interval", "must be > 0"));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        let i = &self.interaction;
        if i.handle_size <= 0.0 {
            return Err(SettingsError::invalid("interaction.handle_size", "must be > 0"));
        }
        if i.min_resize_size <= 0.0 {
            return Err(SettingsError::invalid("interaction.min_resize_size", "must be > 0"));
        }

        let o = &self.objects;
        let sizes = [
            ("objects.note_width", o.note_width),
            ("objects.note_height", o.note_height),
            ("objects.note_font_size", o.note_font_size),
            ("objects.text_width", o.text_width),
            ("objects.text_height", o.text_height),
            ("objects.text_font_size", o.text_font_size),
            ("objects.image_max_width", o.image_max_width),
        ];
        for (key, value) in sizes {
            if value <= 0.0 {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }
        if o.note_padding < 0.0 || o.text_padding < 0.0 {
            return Err(SettingsError::invalid("objects.padding", "must be >= 0"));
        }

        Ok(())
    }

    fn float_settings(&self) -> [(&'static str, f64); 19] {
        let (v, g, i, o) = (&self.viewport, &self.grid, &self.interaction, &self.objects);
        [
            ("viewport.min_zoom", v.min_zoom),
            ("viewport.max_zoom", v.max_zoom),
            ("viewport.zoom_step", v.zoom_step),
            ("viewport.scroll_zoom_factor", v.scroll_zoom_factor),
            ("index.cell_size", self.index.cell_size),
            ("grid.size", g.size),
            ("grid.min_cell_pixels", g.min_cell_pixels),
            ("interaction.handle_size", i.handle_size),
            ("interaction.min_resize_size", i.min_resize_size),
            ("interaction.duplicate_offset", i.duplicate_offset),
            ("objects.note_width", o.note_width),
            ("objects.note_height", o.note_height),
            ("objects.note_font_size", o.note_font_size),
            ("objects.note_padding", o.note_padding),
            ("objects.text_width", o.text_width),
            ("objects.text_height", o.text_height),
            ("objects.text_font_size", o.text_font_size),
            ("objects.text_padding", o.text_padding),
            ("objects.image_max_width", o.image_max_width),
        ]
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
