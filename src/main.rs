use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn};

use corkboard::{init_logging, BoardSummary, CanvasConfig, InteractionController, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("Corkboard {}", VERSION);

    let config = match CanvasConfig::default_path() {
        Ok(path) => CanvasConfig::load_or_default(&path),
        Err(e) => {
            warn!("No config directory ({}), using defaults", e);
            CanvasConfig::default()
        }
    };
    config.validate().context("Invalid canvas configuration")?;

    let mut canvas = InteractionController::new(&config);

    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        let report = canvas
            .open_board(&path)
            .with_context(|| format!("Failed to open board {}", path.display()))?;
        info!(
            "Opened {}: {} objects loaded, {} skipped",
            path.display(),
            report.loaded,
            report.skipped
        );
    }

    info!("{}", BoardSummary::from_document(canvas.document()));
    info!("{}", canvas.viewport());
    Ok(())
}
