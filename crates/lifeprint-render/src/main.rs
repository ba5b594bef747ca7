//! Lifeprint binary.
//!
//! Seeds a Game of Life board sized to a fixed canvas, advances it for the
//! configured number of generations, and writes every generation as a PNG
//! with each live cell painted in a randomly sampled color.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `lifeprint-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Validate the configuration
//! 4. Compute the canvas layout and seed the board
//! 5. Create the color sampler
//! 6. Prepare the output folder and raster canvas
//! 7. Run the generation loop
//! 8. Write the run manifest
//! 9. Log the result

mod error;
mod output;
mod raster;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use lifeprint_color::ColorSampler;
use lifeprint_core::config::{DEFAULT_CONFIG_FILE, LifeprintConfig};
use lifeprint_core::runner::{self, RunOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RenderError;
use crate::output::{OutputFolder, RunManifest};
use crate::raster::RasterCanvas;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step or the run itself fails.
fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("lifeprint starting");
    info!(
        columns = config.board.columns,
        seed = config.board.seed,
        canvas_width = config.canvas.width,
        canvas_height = config.canvas.height,
        generations = config.simulation.generations,
        "Configuration loaded"
    );

    // 3. Validate.
    config.validate().context("validating configuration")?;

    // 4. Layout and board.
    let layout = config.layout().context("computing canvas layout")?;
    let mut engine = runner::seed_engine(&config).context("seeding board")?;
    info!(
        columns = layout.columns(),
        rows = layout.rows(),
        square_size = layout.square_size(),
        "Canvas layout computed"
    );

    // 5. Color sampler.
    let mut sampler = ColorSampler::seeded(config.sampler_seed());
    info!(
        seed = config.sampler_seed(),
        hue = config.palette.hue.as_str(),
        policy = ?config.palette.hue_policy,
        "Color sampler ready"
    );

    // 6. Output folder and canvas.
    let started = Local::now();
    let folder = OutputFolder::new(&config.output, layout.columns(), started);
    info!(path = %folder.path().display(), "Frames will be written here");
    let mut canvas = RasterCanvas::new(layout, config.canvas.background, folder);

    // 7. Run.
    let options = RunOptions::from(&config);
    let summary = runner::run_generations(&mut engine, &mut sampler, &options, &mut canvas)
        .context("running generations")?;

    // 8. Manifest.
    if config.output.write_manifest {
        let manifest = RunManifest::new(started, &config, &layout, &summary);
        let path = canvas
            .output_mut()
            .write_manifest(&manifest)
            .context("writing manifest")?;
        info!(path = %path.display(), "Run manifest written");
    }

    // 9. Log results.
    runner::log_run_end(&summary);
    info!(
        frames_written = canvas.written().len(),
        "lifeprint shutdown complete"
    );

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
fn load_config(path: &Path) -> Result<LifeprintConfig, RenderError> {
    if path.exists() {
        Ok(LifeprintConfig::from_file(path)?)
    } else {
        let mut config = LifeprintConfig::default();
        config
            .output
            .apply_override(std::env::var(lifeprint_core::config::OUTPUT_DIR_ENV).ok());
        Ok(config)
    }
}
