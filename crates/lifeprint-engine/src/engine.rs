//! The automaton engine: board ownership, resets, and generation stepping.
//!
//! [`LifeEngine`] is the only owner of the [`Board`]. All mutation goes
//! through it and every coordinate is bounds-checked against the board.
//! Coordinates are signed so that negative input is reported as
//! [`EngineError::OutOfBounds`] instead of being unrepresentable.
//!
//! # Advancement
//!
//! [`LifeEngine::advance`] builds the next board from an immutable snapshot
//! of the current one and then swaps it in. A cell updated early in the scan
//! never affects the neighbor count of a later cell in the same generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::board::Board;
use crate::error::EngineError;
use crate::patterns::Pattern;

/// Default threshold for [`LifeEngine::reset_random`]: a uniform draw of at
/// least `0.80` makes a cell live.
pub const DEFAULT_LIVE_THRESHOLD: f64 = 0.20;

/// A value that can seed a cell: live iff truthy (non-zero).
pub trait CellState {
    /// Whether this value marks a live cell.
    fn is_live(&self) -> bool;
}

impl CellState for bool {
    fn is_live(&self) -> bool {
        *self
    }
}

macro_rules! int_cell_state {
    ($($t:ty),*) => {
        $(
            impl CellState for $t {
                fn is_live(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

int_cell_state!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl CellState for f32 {
    fn is_live(&self) -> bool {
        *self != 0.0
    }
}

impl CellState for f64 {
    fn is_live(&self) -> bool {
        *self != 0.0
    }
}

/// Game of Life engine over a fixed-size, non-wrapping board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeEngine {
    /// Current generation's cells.
    board: Board,
    /// Rule applications since the last reset.
    generation: u64,
}

impl LifeEngine {
    /// Create an engine with an all-dead `width x height` board at
    /// generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] if either dimension is
    /// zero or negative.
    pub fn new(width: i64, height: i64) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidDimensions { width, height };
        let w = usize::try_from(width).map_err(|_e| invalid())?;
        let h = usize::try_from(height).map_err(|_e| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }
        if w.checked_mul(h).is_none() {
            return Err(invalid());
        }
        Ok(Self {
            board: Board::dead(w, h),
            generation: 0,
        })
    }

    /// Replace the board with a seeded random one.
    ///
    /// Each cell is live when its uniform draw in `[0, 1)` is at least
    /// `threshold`, so cells are live with probability `1 - threshold`.
    /// The same seed always yields the same board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidThreshold`] if `threshold` is not in
    /// `[0, 1]`.
    pub fn reset_random(&mut self, seed: u64, threshold: f64) -> Result<(), EngineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.reset_with_rng(&mut rng, threshold)?;
        debug!(
            seed,
            threshold,
            live = self.board.live_count(),
            "board reset from seed"
        );
        Ok(())
    }

    /// Replace the board using a caller-owned random source.
    ///
    /// Draws are consumed column by column: for each `x`, every `y` in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidThreshold`] if `threshold` is not in
    /// `[0, 1]`. No randomness is consumed in that case.
    pub fn reset_with_rng<R: Rng>(
        &mut self,
        rng: &mut R,
        threshold: f64,
    ) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(EngineError::InvalidThreshold { threshold });
        }
        let mut board = Board::dead(self.board.width(), self.board.height());
        for x in 0..board.width() {
            for y in 0..board.height() {
                let draw: f64 = rng.random();
                board.set(x, y, draw >= threshold);
            }
        }
        self.replace(board);
        Ok(())
    }

    /// Replace the board from explicit states indexed `[x][y]`.
    ///
    /// A cell is live iff its value is truthy (non-zero).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DimensionMismatch`] if there are not exactly
    /// `width` columns of exactly `height` values each. The board is left
    /// unchanged on error.
    pub fn reset_from<S, T>(&mut self, states: &[S]) -> Result<(), EngineError>
    where
        S: AsRef<[T]>,
        T: CellState,
    {
        let width = self.board.width();
        let height = self.board.height();
        let mismatch = |found_width: usize, found_height: usize| EngineError::DimensionMismatch {
            width,
            height,
            found_width,
            found_height,
        };

        if states.len() != width {
            return Err(mismatch(states.len(), height));
        }
        if let Some(column) = states.iter().find(|c| c.as_ref().len() != height) {
            return Err(mismatch(width, column.as_ref().len()));
        }

        let mut board = Board::dead(width, height);
        for (x, column) in states.iter().enumerate() {
            for (y, value) in column.as_ref().iter().enumerate() {
                board.set(x, y, value.is_live());
            }
        }
        self.replace(board);
        debug!(live = self.board.live_count(), "board reset from states");
        Ok(())
    }

    /// Replace the board with `pattern` centered on an otherwise dead grid.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] (reporting the pattern's far
    /// corner) if the pattern does not fit on the board.
    pub fn reset_pattern(&mut self, pattern: &Pattern) -> Result<(), EngineError> {
        let width = self.board.width();
        let height = self.board.height();
        let (pw, ph) = (pattern.width(), pattern.height());
        if pw > width || ph > height {
            return Err(EngineError::OutOfBounds {
                x: to_coord(pw.saturating_sub(1)),
                y: to_coord(ph.saturating_sub(1)),
                width,
                height,
            });
        }

        let x_off = width.saturating_sub(pw).checked_div(2).unwrap_or(0);
        let y_off = height.saturating_sub(ph).checked_div(2).unwrap_or(0);
        let mut board = Board::dead(width, height);
        for &(x, y) in pattern.cells {
            board.set(x.saturating_add(x_off), y.saturating_add(y_off), true);
        }
        self.replace(board);
        debug!(pattern = pattern.name, "board reset from pattern");
        Ok(())
    }

    /// Whether `(x, y)` lies within `[0, width) x [0, height)`.
    pub fn is_in_bounds(&self, x: i64, y: i64) -> bool {
        self.board.contains(x, y)
    }

    /// Make the cell at `(x, y)` live.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if the cell is not on the board.
    pub fn set_live(&mut self, x: i64, y: i64) -> Result<(), EngineError> {
        let (cx, cy) = self.checked(x, y)?;
        self.board.set(cx, cy, true);
        Ok(())
    }

    /// Make the cell at `(x, y)` dead.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if the cell is not on the board.
    pub fn set_dead(&mut self, x: i64, y: i64) -> Result<(), EngineError> {
        let (cx, cy) = self.checked(x, y)?;
        self.board.set(cx, cy, false);
        Ok(())
    }

    /// Return whether the cell at `(x, y)` is live.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if the cell is not on the board.
    pub fn query(&self, x: i64, y: i64) -> Result<bool, EngineError> {
        let (cx, cy) = self.checked(x, y)?;
        Ok(self.board.get(cx, cy))
    }

    /// Apply the Game of Life rule to every cell simultaneously. Returns
    /// the new generation number.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GenerationOverflow`] if the counter is already
    /// at `u64::MAX`; the board is not modified in that case.
    pub fn advance(&mut self) -> Result<u64, EngineError> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or(EngineError::GenerationOverflow)?;
        self.board = self.board.next_generation();
        self.generation = generation;
        Ok(generation)
    }

    /// Return the number of rule applications since the last reset.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only view of the current board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Return the number of columns.
    pub const fn width(&self) -> usize {
        self.board.width()
    }

    /// Return the number of rows.
    pub const fn height(&self) -> usize {
        self.board.height()
    }

    fn replace(&mut self, board: Board) {
        self.board = board;
        self.generation = 0;
    }

    fn checked(&self, x: i64, y: i64) -> Result<(usize, usize), EngineError> {
        let out_of_bounds = || EngineError::OutOfBounds {
            x,
            y,
            width: self.board.width(),
            height: self.board.height(),
        };
        if !self.board.contains(x, y) {
            return Err(out_of_bounds());
        }
        let cx = usize::try_from(x).map_err(|_e| out_of_bounds())?;
        let cy = usize::try_from(y).map_err(|_e| out_of_bounds())?;
        Ok((cx, cy))
    }
}

fn to_coord(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
