#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
//! End-to-end runs of the generation driver against an in-memory renderer.

use lifeprint_color::{ColorSampler, HuePolicy, Rgb, default_hues};
use lifeprint_core::config::LifeprintConfig;
use lifeprint_core::frame::{FrameError, FrameRenderer, RecordingRenderer};
use lifeprint_core::runner::{RunEndReason, RunOptions, RunnerError, run_generations, seed_engine};
use lifeprint_engine::LifeEngine;

fn small_config() -> LifeprintConfig {
    let mut config = LifeprintConfig::default();
    config.board.columns = 10;
    config.canvas.width = 110;
    config.canvas.height = 100;
    config.canvas.margin = 10;
    config.simulation.generations = 5;
    config
}

fn run(config: &LifeprintConfig) -> (lifeprint_core::runner::RunSummary, RecordingRenderer) {
    let mut engine = seed_engine(config).unwrap();
    let mut sampler = ColorSampler::seeded(config.sampler_seed());
    let mut renderer = RecordingRenderer::new();
    let summary = run_generations(
        &mut engine,
        &mut sampler,
        &RunOptions::from(config),
        &mut renderer,
    )
    .unwrap();
    (summary, renderer)
}

#[test]
fn draws_initial_frame_plus_each_generation() {
    let (summary, renderer) = run(&small_config());

    assert_eq!(summary.end_reason, RunEndReason::Completed);
    assert_eq!(summary.generations_run, 5);
    assert_eq!(summary.final_generation, 5);
    assert_eq!(summary.frames.len(), 6);

    let generations: Vec<u64> = renderer.frames().iter().map(|f| f.generation).collect();
    assert_eq!(generations, vec![0, 1, 2, 3, 4, 5]);
    for (record, frame) in summary.frames.iter().zip(renderer.frames()) {
        assert_eq!(record.tag, frame.tag);
        assert_eq!(record.live_cells, frame.cells.len());
    }
    assert_eq!(
        summary.final_live_count,
        summary.frames.last().unwrap().live_cells
    );
}

#[test]
#[allow(clippy::cast_precision_loss)]
fn default_board_starts_about_a_fifth_alive() {
    let engine = seed_engine(&LifeprintConfig::default()).unwrap();
    let cells = (engine.width() * engine.height()) as f64;
    let density = engine.board().live_count() as f64 / cells;
    assert!(
        (0.15..=0.25).contains(&density),
        "default density {density} is not about 20%"
    );
}

#[test]
fn zero_generations_draws_only_the_seed() {
    let mut config = small_config();
    config.simulation.generations = 0;
    let (summary, renderer) = run(&config);
    assert_eq!(summary.generations_run, 0);
    assert_eq!(renderer.frames().len(), 1);
    assert_eq!(renderer.frames()[0].generation, 0);
}

#[test]
fn same_config_same_frames() {
    let config = small_config();
    let (_, first) = run(&config);
    let (_, second) = run(&config);
    assert_eq!(first.into_frames(), second.into_frames());
}

#[test]
fn different_palette_seed_changes_colors_not_cells() {
    let config = small_config();
    let mut reseeded = small_config();
    reseeded.palette.seed = Some(1234);

    let a = run(&config).1.into_frames();
    let b = run(&reseeded).1.into_frames();

    let positions = |frames: &[lifeprint_core::frame::RecordedFrame]| -> Vec<Vec<(usize, usize)>> {
        frames
            .iter()
            .map(|f| f.cells.iter().map(|&(x, y, _)| (x, y)).collect())
            .collect()
    };
    assert_eq!(positions(&a), positions(&b));
    assert_ne!(a, b);
}

#[test]
fn per_frame_tags_name_buckets() {
    let (summary, _) = run(&small_config());
    for record in &summary.frames {
        assert!(
            default_hues().contains(&record.tag),
            "tag {} is not a hue bucket",
            record.tag
        );
    }
}

#[test]
fn per_cell_tags_keep_the_alias() {
    let mut config = small_config();
    config.palette.hue_policy = HuePolicy::PerCell;
    let (summary, _) = run(&config);
    assert!(summary.frames.iter().all(|r| r.tag == "cycle"));
}

#[test]
fn fixed_value_bucket_caps_brightness() {
    let mut config = small_config();
    config.palette.value = "0.7".to_owned();
    let (_, renderer) = run(&config);
    let painted: Vec<Rgb> = renderer
        .frames()
        .iter()
        .flat_map(|f| f.cells.iter().map(|&(_, _, c)| c))
        .collect();
    assert!(!painted.is_empty());
    assert!(painted.iter().all(|c| c.r.max(c.g).max(c.b) == 178));
}

#[test]
fn blinker_stops_when_stable() {
    let mut config = small_config();
    config.board.pattern = Some("blinker".to_owned());
    config.simulation.generations = 50;
    config.simulation.stop_when_stable = true;
    config.simulation.stability_window = 4;

    let (summary, renderer) = run(&config);
    assert_eq!(
        summary.end_reason,
        RunEndReason::Stable {
            repeated_generation: 0
        }
    );
    assert_eq!(summary.final_generation, 2);
    assert_eq!(renderer.frames().len(), 3);
    assert!(renderer.frames().iter().all(|f| f.cells.len() == 3));
}

#[test]
fn extinction_is_stable() {
    let mut engine = LifeEngine::new(5, 5).unwrap();
    engine.set_live(2, 2).unwrap();
    let options = RunOptions {
        generations: 20,
        stop_when_stable: true,
        stability_window: 3,
        ..RunOptions::from(&LifeprintConfig::default())
    };
    let mut sampler = ColorSampler::seeded(0);
    let mut renderer = RecordingRenderer::new();

    let summary = run_generations(&mut engine, &mut sampler, &options, &mut renderer).unwrap();
    assert_eq!(
        summary.end_reason,
        RunEndReason::Stable {
            repeated_generation: 1
        }
    );
    assert_eq!(summary.final_live_count, 0);
    assert_eq!(summary.generations_run, 2);
}

#[test]
fn without_stability_check_runs_to_the_end() {
    let mut config = small_config();
    config.board.pattern = Some("blinker".to_owned());
    config.simulation.generations = 8;
    let (summary, _) = run(&config);
    assert_eq!(summary.end_reason, RunEndReason::Completed);
    assert_eq!(summary.final_generation, 8);
}

struct FailingRenderer {
    fail_at: u64,
    finished: Vec<u64>,
}

impl FrameRenderer for FailingRenderer {
    fn begin_frame(&mut self, _generation: u64) {}

    fn paint_cell(&mut self, _x: usize, _y: usize, _color: Rgb) {}

    fn finish_frame(&mut self, generation: u64, _tag: &str) -> Result<(), FrameError> {
        if generation == self.fail_at {
            return Err(FrameError::Encode {
                message: "disk full".to_owned(),
            });
        }
        self.finished.push(generation);
        Ok(())
    }
}

#[test]
fn renderer_failure_stops_the_run() {
    let config = small_config();
    let mut engine = seed_engine(&config).unwrap();
    let mut sampler = ColorSampler::seeded(0);
    let mut renderer = FailingRenderer {
        fail_at: 2,
        finished: Vec::new(),
    };

    let err = run_generations(
        &mut engine,
        &mut sampler,
        &RunOptions::from(&config),
        &mut renderer,
    )
    .unwrap_err();

    assert!(matches!(err, RunnerError::Frame { .. }));
    assert_eq!(renderer.finished, vec![0, 1]);
    assert_eq!(engine.generation(), 2);
}
