//! Error types for the `lifeprint-color` crate.

use crate::bucket::ColorAxis;

/// Errors that can occur while looking up or building color buckets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// The bucket name is not in the table for that axis.
    #[error("unknown {axis} bucket: {name:?}")]
    UnknownBucket {
        /// Which table was searched.
        axis: ColorAxis,
        /// The name that was not found.
        name: String,
    },

    /// A bucket range is inverted or leaves `[0, 1]`.
    #[error("invalid range for bucket {name:?}: [{lo}, {hi}] must satisfy 0 <= lo <= hi <= 1")]
    InvalidRange {
        /// Bucket name.
        name: String,
        /// Lower bound.
        lo: f64,
        /// Upper bound.
        hi: f64,
    },

    /// A cycle alias was resolved against a table with no buckets.
    #[error("cannot pick a random {axis} bucket from an empty table")]
    EmptyTable {
        /// Which table was empty.
        axis: ColorAxis,
    },
}
