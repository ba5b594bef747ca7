//! Generation driver loop.
//!
//! [`run_generations`] draws the current board, then advances and draws
//! once per generation until the configured count is reached. With
//! `stop_when_stable` it also keeps the hashes of recent boards and stops
//! as soon as a new board repeats one of them. Still lifes, oscillators
//! with a period inside the window, and extinction all end the run this
//! way.
//!
//! Frames are handed to a [`FrameRenderer`]. Color sampling for each live
//! cell happens in row-major order (top row first, left to right), so a
//! given sampler seed always colors the same board the same way.

use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};

use lifeprint_color::{ColorError, ColorSampler, HuePolicy};
use lifeprint_engine::{Board, EngineError, LifeEngine, patterns};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LifeprintConfig;
use crate::frame::{FrameError, FrameRenderer};
use crate::layout::LayoutError;

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The engine rejected an operation.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: EngineError,
    },

    /// A color bucket lookup failed.
    #[error("color error: {source}")]
    Color {
        /// The underlying color error.
        #[from]
        source: ColorError,
    },

    /// The renderer failed to finish a frame.
    #[error("frame error: {source}")]
    Frame {
        /// The underlying frame error.
        #[from]
        source: FrameError,
    },

    /// The canvas cannot hold a grid.
    #[error("layout error: {source}")]
    Layout {
        /// The underlying layout error.
        #[from]
        source: LayoutError,
    },

    /// The configured seed pattern does not exist.
    #[error("unknown pattern `{name}`")]
    UnknownPattern {
        /// Requested pattern name.
        name: String,
    },
}

/// Per-run settings for [`run_generations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Generations to advance after the initial frame.
    pub generations: u64,
    /// Hue selection (bucket name or cycle alias).
    pub hue: String,
    /// Saturation bucket name.
    pub saturation: String,
    /// Value bucket name.
    pub value: String,
    /// How often a cycle alias is resolved.
    pub hue_policy: HuePolicy,
    /// Stop once a board repeats a recent one.
    pub stop_when_stable: bool,
    /// Number of recent boards to remember.
    pub stability_window: usize,
}

impl From<&LifeprintConfig> for RunOptions {
    fn from(config: &LifeprintConfig) -> Self {
        Self {
            generations: config.simulation.generations,
            hue: config.palette.hue.clone(),
            saturation: config.palette.saturation.clone(),
            value: config.palette.value.clone(),
            hue_policy: config.palette.hue_policy,
            stop_when_stable: config.simulation.stop_when_stable,
            stability_window: config.simulation.stability_window,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RunEndReason {
    /// Every requested generation was drawn.
    Completed,
    /// The board repeated the one seen at `repeated_generation`.
    Stable {
        /// Generation whose board came back.
        repeated_generation: u64,
    },
}

/// One drawn frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    /// Generation shown.
    pub generation: u64,
    /// Hue tag the frame was finished with.
    pub tag: String,
    /// Live cells painted.
    pub live_cells: usize,
}

/// Outcome of [`run_generations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Generations advanced during the run.
    pub generations_run: u64,
    /// Generation counter when the run ended.
    pub final_generation: u64,
    /// Live cells on the final board.
    pub final_live_count: usize,
    /// Why the run ended.
    pub end_reason: RunEndReason,
    /// Every frame drawn, in order.
    pub frames: Vec<FrameRecord>,
}

/// Build an engine sized by the configured layout and seed it.
///
/// A configured pattern is centered on the board; otherwise the board is
/// filled at random from `board.seed` and `board.live_threshold`.
///
/// # Errors
///
/// Returns [`RunnerError::Layout`] if the canvas cannot hold a grid,
/// [`RunnerError::UnknownPattern`] for an unknown pattern name, or
/// [`RunnerError::Engine`] if seeding fails.
pub fn seed_engine(config: &LifeprintConfig) -> Result<LifeEngine, RunnerError> {
    let layout = config.layout()?;
    let (width, height) = layout.board_dimensions();
    let mut engine = LifeEngine::new(width, height)?;

    match &config.board.pattern {
        Some(name) => {
            let pattern = patterns::find(name)
                .ok_or_else(|| RunnerError::UnknownPattern { name: name.clone() })?;
            engine.reset_pattern(pattern)?;
        }
        None => engine.reset_random(config.board.seed, config.board.live_threshold)?,
    }

    info!(
        width,
        height,
        live = engine.board().live_count(),
        pattern = config.board.pattern.as_deref(),
        "Board seeded"
    );
    Ok(engine)
}

/// Draw the engine's current board.
///
/// Returns the tag the frame was finished with.
///
/// # Errors
///
/// Returns [`RunnerError::Color`] for an unknown bucket name, or
/// [`RunnerError::Frame`] if the renderer fails.
pub fn draw_generation<R: Rng>(
    engine: &LifeEngine,
    sampler: &mut ColorSampler<R>,
    options: &RunOptions,
    renderer: &mut dyn FrameRenderer,
) -> Result<String, RunnerError> {
    let generation = engine.generation();
    let hue = sampler.begin_frame(&options.hue, options.hue_policy)?;

    renderer.begin_frame(generation);
    for (x, y) in engine.board().live_cells() {
        let color = sampler.sample_color(&hue.bucket, &options.saturation, &options.value)?;
        renderer.paint_cell(x, y, color);
    }
    renderer.finish_frame(generation, &hue.tag)?;

    Ok(hue.tag)
}

/// Run the generation loop.
///
/// Draws the current board, then advances and draws `options.generations`
/// times, or fewer if the board stabilizes and `stop_when_stable` is set.
///
/// # Errors
///
/// Returns [`RunnerError`] from the first failing draw or advance. Frames
/// already handed to the renderer stay handed over.
pub fn run_generations<R: Rng>(
    engine: &mut LifeEngine,
    sampler: &mut ColorSampler<R>,
    options: &RunOptions,
    renderer: &mut dyn FrameRenderer,
) -> Result<RunSummary, RunnerError> {
    info!(
        generations = options.generations,
        width = engine.width(),
        height = engine.height(),
        hue = options.hue.as_str(),
        saturation = options.saturation.as_str(),
        value = options.value.as_str(),
        "Run starting"
    );

    let start = engine.generation();
    let mut frames = Vec::new();
    let mut history = options
        .stop_when_stable
        .then(|| BoardHistory::new(options.stability_window));

    frames.push(draw_and_record(engine, sampler, options, renderer)?);
    if let Some(history) = history.as_mut() {
        history.observe(engine.board(), start);
    }

    let mut end_reason = RunEndReason::Completed;
    for _ in 0..options.generations {
        let generation = engine.advance()?;
        frames.push(draw_and_record(engine, sampler, options, renderer)?);

        if let Some(repeated) = history
            .as_mut()
            .and_then(|h| h.observe(engine.board(), generation))
        {
            info!(
                generation,
                repeated_generation = repeated,
                "Board repeated, stopping early"
            );
            end_reason = RunEndReason::Stable {
                repeated_generation: repeated,
            };
            break;
        }
    }

    Ok(RunSummary {
        generations_run: engine.generation().saturating_sub(start),
        final_generation: engine.generation(),
        final_live_count: engine.board().live_count(),
        end_reason,
        frames,
    })
}

/// Log the end of a run.
pub fn log_run_end(summary: &RunSummary) {
    info!(
        reason = ?summary.end_reason,
        generations_run = summary.generations_run,
        final_generation = summary.final_generation,
        final_live_count = summary.final_live_count,
        frames = summary.frames.len(),
        "Run ended"
    );
    if summary.final_live_count == 0 {
        warn!(
            final_generation = summary.final_generation,
            "Board ended extinct"
        );
    }
}

fn draw_and_record<R: Rng>(
    engine: &LifeEngine,
    sampler: &mut ColorSampler<R>,
    options: &RunOptions,
    renderer: &mut dyn FrameRenderer,
) -> Result<FrameRecord, RunnerError> {
    let tag = draw_generation(engine, sampler, options, renderer)?;
    let record = FrameRecord {
        generation: engine.generation(),
        tag,
        live_cells: engine.board().live_count(),
    };
    debug!(
        generation = record.generation,
        tag = record.tag.as_str(),
        live = record.live_cells,
        "Frame drawn"
    );
    Ok(record)
}

/// Hashes of the most recent boards, oldest first.
#[derive(Debug)]
struct BoardHistory {
    window: usize,
    seen: VecDeque<(u64, u64)>,
}

impl BoardHistory {
    fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            seen: VecDeque::with_capacity(window),
        }
    }

    /// Record `board` and return the generation it repeats, if any.
    fn observe(&mut self, board: &Board, generation: u64) -> Option<u64> {
        let hash = hash_board(board);
        if let Some(&(_, earlier)) = self.seen.iter().find(|(h, _)| *h == hash) {
            return Some(earlier);
        }
        if self.seen.len() == self.window {
            self.seen.pop_front();
        }
        self.seen.push_back((hash, generation));
        None
    }
}

fn hash_board(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    hasher.finish()
}
