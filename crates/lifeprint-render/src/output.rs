//! Per-run output folder and manifest.
//!
//! Each run writes into its own folder named after the start time and the
//! board width, e.g. `outputs/Images_20240131_142501_squares_27`. The folder
//! is created on the first write, so a run that fails before drawing leaves
//! nothing behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lifeprint_core::config::{LifeprintConfig, OutputConfig};
use lifeprint_core::layout::CanvasLayout;
use lifeprint_core::runner::RunSummary;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::RenderError;

/// File name of the run manifest inside the run folder.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name for a frame: `img_<generation:04>_<tag>.png`.
pub fn frame_file_name(generation: u64, tag: &str) -> String {
    format!("img_{generation:04}_{tag}.png")
}

/// A lazily created run folder.
#[derive(Debug, Clone)]
pub struct OutputFolder {
    path: PathBuf,
    created: bool,
}

impl OutputFolder {
    /// Folder for a run of `columns` columns started at `started`.
    pub fn new(output: &OutputConfig, columns: u32, started: DateTime<Local>) -> Self {
        let name = format!(
            "{}_{}_squares_{columns}",
            output.folder_prefix,
            started.format("%Y%m%d_%H%M%S")
        );
        Self {
            path: output.directory.join(name),
            created: false,
        }
    }

    /// Folder path, whether or not it exists yet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the folder if this is the first write.
    pub fn ensure(&mut self) -> std::io::Result<&Path> {
        if !self.created {
            fs::create_dir_all(&self.path)?;
            self.created = true;
            info!(path = %self.path.display(), "Output folder created");
        }
        Ok(&self.path)
    }

    /// Path for a frame file, creating the folder if needed.
    pub fn frame_path(&mut self, generation: u64, tag: &str) -> std::io::Result<PathBuf> {
        Ok(self.ensure()?.join(frame_file_name(generation, tag)))
    }

    /// Write `manifest.json` and return its path.
    pub fn write_manifest(&mut self, manifest: &RunManifest<'_>) -> Result<PathBuf, RenderError> {
        let path = self.ensure()?.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "Manifest written");
        Ok(path)
    }
}

/// Everything needed to reproduce or audit a run.
#[derive(Debug, Serialize)]
pub struct RunManifest<'a> {
    /// Local start time, RFC 3339.
    pub started_at: String,
    /// Configuration the run used.
    pub config: &'a LifeprintConfig,
    /// Canvas geometry.
    pub layout: &'a CanvasLayout,
    /// Run outcome.
    pub summary: &'a RunSummary,
    /// Frame file names, in generation order.
    pub files: Vec<String>,
}

impl<'a> RunManifest<'a> {
    /// Assemble a manifest; frame file names follow from the summary.
    pub fn new(
        started: DateTime<Local>,
        config: &'a LifeprintConfig,
        layout: &'a CanvasLayout,
        summary: &'a RunSummary,
    ) -> Self {
        let files = summary
            .frames
            .iter()
            .map(|frame| frame_file_name(frame.generation, &frame.tag))
            .collect();
        Self {
            started_at: started.to_rfc3339(),
            config,
            layout,
            summary,
            files,
        }
    }
}
