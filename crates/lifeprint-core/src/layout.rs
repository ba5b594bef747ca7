//! Mapping between board cells and canvas pixels.
//!
//! The canvas is a fixed pixel size. The board gets a requested number of
//! columns, with `margin` pixels of horizontal space held back. Each cell
//! is a square of side `(canvas_width - margin) / columns`. The row count is
//! however many of those squares fit vertically, and the grid is centered
//! on both axes.

/// Errors that can occur when computing a canvas layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The requested geometry leaves no room for a grid.
    #[error("invalid layout: {reason}")]
    InvalidLayout {
        /// Explanation of what is wrong with the geometry.
        reason: String,
    },
}

/// A cell's rectangle on the canvas, in fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

/// Grid geometry on a fixed-size canvas.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CanvasLayout {
    canvas_width: u32,
    canvas_height: u32,
    columns: u32,
    rows: u32,
    square_size: f64,
    x_offset: f64,
    y_offset: f64,
}

impl CanvasLayout {
    /// Compute the layout for `columns` cells across a canvas.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidLayout`] if `columns` is zero, the
    /// margin consumes the whole width, or not a single row fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(
        columns: u32,
        canvas_width: u32,
        canvas_height: u32,
        margin: u32,
    ) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(invalid("columns must be at least 1"));
        }
        let usable = canvas_width
            .checked_sub(margin)
            .filter(|&w| w > 0)
            .ok_or_else(|| invalid("margin must be smaller than the canvas width"))?;

        let square_size = f64::from(usable) / f64::from(columns);
        let rows = (f64::from(canvas_height) / square_size).floor() as u32;
        if rows == 0 {
            return Err(invalid("canvas is shorter than one cell"));
        }

        let x_offset = f64::from(columns).mul_add(-square_size, f64::from(canvas_width)) / 2.0;
        let y_offset = f64::from(rows).mul_add(-square_size, f64::from(canvas_height)) / 2.0;

        Ok(Self {
            canvas_width,
            canvas_height,
            columns,
            rows,
            square_size,
            x_offset,
            y_offset,
        })
    }

    /// Canvas width in pixels.
    pub const fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    /// Canvas height in pixels.
    pub const fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Number of board columns.
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of board rows that fit on the canvas.
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of one cell in pixels.
    pub const fn square_size(&self) -> f64 {
        self.square_size
    }

    /// Board dimensions as accepted by `LifeEngine::new`.
    pub fn board_dimensions(&self) -> (i64, i64) {
        (i64::from(self.columns), i64::from(self.rows))
    }

    /// Pixel rectangle of cell `(x, y)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_rect(&self, x: usize, y: usize) -> CellRect {
        let s = self.square_size;
        let (fx, fy) = (x as f64, y as f64);
        CellRect {
            x0: fx.mul_add(s, self.x_offset),
            y0: fy.mul_add(s, self.y_offset),
            x1: (fx + 1.0).mul_add(s, self.x_offset),
            y1: (fy + 1.0).mul_add(s, self.y_offset),
        }
    }
}

fn invalid(reason: &str) -> LayoutError {
    LayoutError::InvalidLayout {
        reason: reason.to_owned(),
    }
}
