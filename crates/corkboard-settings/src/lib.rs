//! Corkboard Settings Crate
//!
//! Handles canvas configuration: defaults, validation, and JSON/TOML
//! persistence in the platform config directory.

pub mod config;
pub mod error;

pub use config::{
    CanvasConfig, GridSettings, HistorySettings, IndexSettings, InteractionSettings,
    ObjectDefaults, ViewportSettings,
};
pub use error::{SettingsError, SettingsResult};
