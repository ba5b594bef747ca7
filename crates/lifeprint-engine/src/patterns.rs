//! Named seed patterns.
//!
//! Patterns are stored as `(x, y)` offsets from their top-left corner and
//! placed centered on the board by [`LifeEngine::reset_pattern`].
//!
//! [`LifeEngine::reset_pattern`]: crate::LifeEngine::reset_pattern

/// A named set of live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Lowercase name used for lookup from configuration.
    pub name: &'static str,
    /// Live cells as `(x, y)` offsets.
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Width of the pattern's bounding box.
    pub fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|&(x, _)| x.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// Height of the pattern's bounding box.
    pub fn height(&self) -> usize {
        self.cells
            .iter()
            .map(|&(_, y)| y.saturating_add(1))
            .max()
            .unwrap_or(0)
    }
}

/// Every built-in pattern.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

/// Look up a built-in pattern by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
