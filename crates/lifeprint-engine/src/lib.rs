//! Automaton engine for the Lifeprint simulation.
//!
//! This crate owns the Game of Life grid: a fixed-size boolean board, the
//! neighbor-count rule that produces the next generation, and the
//! generation counter. It performs no I/O; rendering and persistence are
//! driven from outside by calling [`LifeEngine::advance`] in a loop.
//!
//! # Modules
//!
//! - [`board`] -- The [`Board`] grid with bounds-aware neighbor counting
//!   and snapshot-based next-generation computation.
//! - [`engine`] -- [`LifeEngine`]: construction, resets (seeded random,
//!   explicit states, named patterns), cell mutation, and advancement.
//! - [`error`] -- Error types for engine operations.
//! - [`patterns`] -- Small library of named seed patterns.

pub mod board;
pub mod engine;
pub mod error;
pub mod patterns;

// Re-export primary types at crate root.
pub use board::Board;
pub use engine::{CellState, DEFAULT_LIVE_THRESHOLD, LifeEngine};
pub use error::EngineError;
pub use patterns::Pattern;
