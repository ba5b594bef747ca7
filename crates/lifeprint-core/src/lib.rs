//! Configuration, canvas layout, and the generation driver for Lifeprint.
//!
//! This crate ties the automaton engine to the color sampler. It owns the
//! run configuration, maps board cells onto a fixed-size canvas, and drives
//! the loop that advances the board and hands each frame to a renderer.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `lifeprint-config.yaml` into
//!   strongly-typed structs.
//! - [`layout`] -- [`CanvasLayout`], the cell-to-pixel mapping.
//! - [`frame`] -- [`FrameRenderer`] trait and [`RecordingRenderer`].
//! - [`runner`] -- [`run_generations`] and the run summary types.
//!
//! [`CanvasLayout`]: layout::CanvasLayout
//! [`FrameRenderer`]: frame::FrameRenderer
//! [`RecordingRenderer`]: frame::RecordingRenderer
//! [`run_generations`]: runner::run_generations

pub mod config;
pub mod frame;
pub mod layout;
pub mod runner;
