//! Named color buckets.
//!
//! A bucket is an inclusive `[lo, hi]` range inside `[0, 1]`. Two default
//! tables exist:
//!
//! - Hues, in turns. The table is curated: reds, pure greens, blues, and
//!   magentas are left out so output stays within a pleasing set of
//!   families.
//! - Saturation/value levels. One table serves both axes.
//!
//! The defaults are built once on first use and are never mutated. Samplers
//! receive their tables by value, so tests and callers can substitute their
//! own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ColorError;

/// Hue selections that pick a bucket at random instead of naming one.
pub const CYCLE_ALIASES: [&str; 2] = ["cycle", "random_options"];

/// Whether `name` is a cycle alias rather than a bucket name.
pub fn is_cycle_alias(name: &str) -> bool {
    CYCLE_ALIASES.contains(&name)
}

/// The color channel a bucket constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorAxis {
    /// Hue, in turns.
    Hue,
    /// Saturation.
    Saturation,
    /// Value (brightness).
    Value,
}

impl fmt::Display for ColorAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Value => "value",
        };
        f.write_str(name)
    }
}

/// An inclusive sampling range within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BucketRange {
    lo: f64,
    hi: f64,
}

impl BucketRange {
    /// Create a range, checking `0 <= lo <= hi <= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidRange`] if the bounds are inverted,
    /// outside `[0, 1]`, or NaN.
    pub fn new(name: &str, lo: f64, hi: f64) -> Result<Self, ColorError> {
        let unit = 0.0..=1.0;
        if unit.contains(&lo) && unit.contains(&hi) && lo <= hi {
            Ok(Self { lo, hi })
        } else {
            Err(ColorError::InvalidRange {
                name: name.to_owned(),
                lo,
                hi,
            })
        }
    }

    /// Lower bound.
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Map a unit draw `t` in `[0, 1)` into the range.
    pub fn at(&self, t: f64) -> f64 {
        (self.hi - self.lo).mul_add(t, self.lo)
    }
}

/// A read-only mapping from bucket name to [`BucketRange`].
///
/// Iteration order is by name, which keeps random bucket picks
/// reproducible for a given seed.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct BucketTable {
    buckets: BTreeMap<String, BucketRange>,
}

impl BucketTable {
    /// Build a table from `(name, lo, hi)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidRange`] for the first invalid entry.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ColorError>
    where
        I: IntoIterator<Item = (&'a str, f64, f64)>,
    {
        let mut buckets = BTreeMap::new();
        for (name, lo, hi) in entries {
            buckets.insert(name.to_owned(), BucketRange::new(name, lo, hi)?);
        }
        Ok(Self { buckets })
    }

    /// Look up a bucket by name.
    pub fn get(&self, name: &str) -> Option<BucketRange> {
        self.buckets.get(name).copied()
    }

    /// Whether the table has a bucket called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the table has no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// The `index`-th bucket name in table order.
    pub fn nth_name(&self, index: usize) -> Option<&str> {
        self.names().nth(index)
    }
}

static HUES: LazyLock<BucketTable> = LazyLock::new(|| {
    curated(&[
        ("orange_brown", 0.0556, 0.1111),
        ("yellow_green", 0.1667, 0.2222),
        ("green_cyan", 0.3889, 0.4694),
        ("cyan", 0.4694, 0.5556),
        ("cyan_blue", 0.5556, 0.6111),
        ("magenta_pink", 0.8889, 0.9167),
        ("pink", 0.9167, 0.9583),
    ])
});

static LEVELS: LazyLock<BucketTable> = LazyLock::new(|| {
    curated(&[
        ("upper", 0.5, 1.0),
        ("lower", 0.0, 0.5),
        ("medium", 0.25, 0.75),
        ("narrow_upper", 0.7, 1.0),
        ("medium_upper", 0.8, 0.9),
        ("narrow_lower", 0.0, 0.25),
        ("narrow_medium", 0.375, 0.625),
        ("0.7", 0.7, 0.7),
        ("0.8", 0.8, 0.8),
        ("0.9", 0.9, 0.9),
        ("full", 0.0, 1.0),
        ("top", 1.0, 1.0),
        ("bottom", 0.0, 0.0),
    ])
});

/// The default hue table.
pub fn default_hues() -> &'static BucketTable {
    &HUES
}

/// The default saturation/value table.
pub fn default_levels() -> &'static BucketTable {
    &LEVELS
}

// Entries are literals checked by the tests below.
fn curated(entries: &[(&str, f64, f64)]) -> BucketTable {
    let buckets = entries
        .iter()
        .map(|&(name, lo, hi)| (name.to_owned(), BucketRange { lo, hi }))
        .collect();
    BucketTable { buckets }
}
