//! Configuration loading and typed config structures for Lifeprint.
//!
//! The canonical configuration lives in `lifeprint-config.yaml` in the
//! working directory. Every field has a default, and the defaults reproduce
//! the business-card run: a 27-column board on a 697x1039 canvas, colored
//! from cycling hues with bright saturation and value, for 1000 generations.

use std::path::{Path, PathBuf};

use lifeprint_color::{Rgb, default_hues, default_levels, is_cycle_alias};
use lifeprint_engine::patterns;
use serde::{Deserialize, Serialize};

use crate::layout::CanvasLayout;

/// Environment variable that overrides `output.directory`.
pub const OUTPUT_DIR_ENV: &str = "LIFEPRINT_OUTPUT_DIR";

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lifeprint-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible run.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeprintConfig {
    /// Board size and seeding.
    #[serde(default)]
    pub board: BoardConfig,

    /// Canvas geometry and background.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Color buckets for live cells.
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Run length and early stopping.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Where frames are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LifeprintConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `LIFEPRINT_OUTPUT_DIR` overrides `output.directory` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config
            .output
            .apply_override(std::env::var(OUTPUT_DIR_ENV).ok());
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults. Environment overrides are
    /// not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Check the configuration against the default color tables, the
    /// known patterns, and the canvas geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let palette = &self.palette;
        if !is_cycle_alias(&palette.hue) && !default_hues().contains(&palette.hue) {
            return Err(invalid(format!("unknown hue bucket `{}`", palette.hue)));
        }
        for (axis, name) in [("saturation", &palette.saturation), ("value", &palette.value)] {
            if !default_levels().contains(name) {
                return Err(invalid(format!("unknown {axis} bucket `{name}`")));
            }
        }

        if !(0.0..=1.0).contains(&self.board.live_threshold) {
            return Err(invalid(format!(
                "live_threshold {} must be within [0, 1]",
                self.board.live_threshold
            )));
        }
        if let Some(name) = &self.board.pattern
            && patterns::find(name).is_none()
        {
            return Err(invalid(format!("unknown pattern `{name}`")));
        }

        if self.simulation.stop_when_stable && self.simulation.stability_window == 0 {
            return Err(invalid(
                "stability_window must be at least 1 when stop_when_stable is set".to_owned(),
            ));
        }

        self.layout()
            .map(|_layout| ())
            .map_err(|e| invalid(e.to_string()))
    }

    /// Canvas layout for the configured board and canvas.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`](crate::layout::LayoutError) if the geometry
    /// leaves no room for a grid.
    pub fn layout(&self) -> Result<CanvasLayout, crate::layout::LayoutError> {
        CanvasLayout::new(
            self.board.columns,
            self.canvas.width,
            self.canvas.height,
            self.canvas.margin,
        )
    }

    /// Seed for the color sampler. Falls back to the board seed.
    pub fn sampler_seed(&self) -> u64 {
        self.palette.seed.unwrap_or(self.board.seed)
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

/// Board size and seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns. Rows follow from the canvas aspect ratio.
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Seed for the random initial board.
    #[serde(default)]
    pub seed: u64,

    /// A draw at or above this value makes a cell live.
    #[serde(default = "default_live_threshold")]
    pub live_threshold: f64,

    /// Seed from a named pattern instead of at random.
    #[serde(default)]
    pub pattern: Option<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            seed: 0,
            live_threshold: default_live_threshold(),
            pattern: None,
        }
    }
}

/// Canvas geometry and background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels.
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Horizontal pixels held back from the grid.
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Background and cell outline color.
    #[serde(default = "default_background")]
    pub background: Rgb,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            margin: default_margin(),
            background: default_background(),
        }
    }
}

/// Color buckets for live cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Hue bucket name, or `cycle` / `random_options`.
    #[serde(default = "default_hue")]
    pub hue: String,

    /// Saturation bucket name.
    #[serde(default = "default_saturation")]
    pub saturation: String,

    /// Value bucket name.
    #[serde(default = "default_value")]
    pub value: String,

    /// Whether a cycling hue resolves per frame or per cell.
    #[serde(default)]
    pub hue_policy: lifeprint_color::HuePolicy,

    /// Sampler seed. `None` reuses the board seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue: default_hue(),
            saturation: default_saturation(),
            value: default_value(),
            hue_policy: lifeprint_color::HuePolicy::default(),
            seed: None,
        }
    }
}

/// Run length and early stopping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generations to advance after the initial frame.
    #[serde(default = "default_generations")]
    pub generations: u64,

    /// Stop once the board repeats a recent state.
    #[serde(default)]
    pub stop_when_stable: bool,

    /// How many recent boards to compare against.
    #[serde(default = "default_stability_window")]
    pub stability_window: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            stop_when_stable: false,
            stability_window: default_stability_window(),
        }
    }
}

/// Where frames are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Parent directory of each run folder.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Prefix of the per-run folder name.
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,

    /// Write `manifest.json` next to the frames.
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

impl OutputConfig {
    /// Replace `directory` with `value` when one is given.
    pub fn apply_override(&mut self, value: Option<String>) {
        if let Some(dir) = value.filter(|d| !d.is_empty()) {
            self.directory = PathBuf::from(dir);
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            folder_prefix: default_folder_prefix(),
            write_manifest: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_columns() -> u32 {
    27
}

// Only draws of at least 0.8 seed a live cell, so about a fifth of the
// board starts alive.
const fn default_live_threshold() -> f64 {
    0.8
}

const fn default_canvas_width() -> u32 {
    697
}

const fn default_canvas_height() -> u32 {
    1039
}

const fn default_margin() -> u32 {
    50
}

const fn default_background() -> Rgb {
    Rgb::WHITE
}

fn default_hue() -> String {
    "cycle".to_owned()
}

fn default_saturation() -> String {
    "narrow_upper".to_owned()
}

fn default_value() -> String {
    "upper".to_owned()
}

const fn default_generations() -> u64 {
    1000
}

const fn default_stability_window() -> usize {
    10
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_folder_prefix() -> String {
    "Images".to_owned()
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
