//! Error types for the `lifeprint-engine` crate.
//!
//! All fallible operations in this crate return [`EngineError`]. Every
//! variant is a caller precondition violation detected synchronously at the
//! offending call; none are retried.

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// A board dimension was zero or negative.
    #[error("invalid board dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// Initial states do not match the board shape.
    #[error(
        "initial states are {found_width}x{found_height} but the board is {width}x{height}"
    )]
    DimensionMismatch {
        /// Board width.
        width: usize,
        /// Board height.
        height: usize,
        /// Number of columns supplied.
        found_width: usize,
        /// Length of the first column that disagreed (or the board height
        /// if only the column count was wrong).
        found_height: usize,
    },

    /// A coordinate lies outside `[0, width) x [0, height)`.
    #[error(
        "coordinates {x} {y} are not available: x must be kept between 0..{width} \
         and y between 0..{height}"
    )]
    OutOfBounds {
        /// Requested x coordinate.
        x: i64,
        /// Requested y coordinate.
        y: i64,
        /// Board width (exclusive upper bound for x).
        width: usize,
        /// Board height (exclusive upper bound for y).
        height: usize,
    },

    /// A live-probability threshold outside `[0, 1]`.
    #[error("live threshold {threshold} is outside [0, 1]")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// The generation counter cannot be incremented any further.
    #[error("generation counter overflow: cannot advance beyond u64::MAX")]
    GenerationOverflow,
}
