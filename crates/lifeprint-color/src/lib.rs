//! Color sampling for the Lifeprint simulation.
//!
//! Live cells are painted with a random color drawn from named
//! hue/saturation/value buckets. A bucket is an inclusive range; a sample
//! is a uniform point inside the hue bucket and the two saturation/value
//! buckets, converted to RGB.
//!
//! # Modules
//!
//! - [`bucket`] -- [`BucketRange`] and [`BucketTable`], plus the curated
//!   default hue and saturation/value tables.
//! - [`error`] -- Error types for bucket lookup and validation.
//! - [`hsv`] -- [`Rgb`] and the HSV to RGB conversion.
//! - [`sampler`] -- [`ColorSampler`], which owns its tables and random
//!   source, and the [`HuePolicy`] controlling how often `cycle` resolves.

pub mod bucket;
pub mod error;
pub mod hsv;
pub mod sampler;

// Re-export primary types at crate root.
pub use bucket::{
    BucketRange, BucketTable, ColorAxis, default_hues, default_levels, is_cycle_alias,
};
pub use error::ColorError;
pub use hsv::{Hsv, Rgb, hsv_to_rgb};
pub use sampler::{ColorSampler, FrameHue, HuePolicy};
