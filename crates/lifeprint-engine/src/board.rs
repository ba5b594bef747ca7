//! The Game of Life grid.
//!
//! A [`Board`] is a `width x height` grid of boolean cells stored row by
//! row (y-major). Its dimensions are fixed at construction; resets replace
//! the whole board rather than resizing it.
//!
//! # Edges
//!
//! The grid does not wrap. A cell on the border only counts the neighbors
//! that lie inside the grid, so corners have at most 3 neighbors and edge
//! cells at most 5.

/// A fixed-size grid of live/dead cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cell states, indexed `y * width + x`.
    cells: Vec<bool>,
}

impl Board {
    /// Create an all-dead board. Callers validate that both dimensions
    /// are positive.
    pub(crate) fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width.saturating_mul(height)],
        }
    }

    /// Return the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies within `[0, width) x [0, height)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let in_x = usize::try_from(x).is_ok_and(|x| x < self.width);
        let in_y = usize::try_from(y).is_ok_and(|y| y < self.height);
        in_x && in_y
    }

    /// Return the state of the cell at `(x, y)`. Cells outside the grid
    /// read as dead.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Set the cell at `(x, y)`. Writes outside the grid are ignored; the
    /// engine bounds-checks before calling.
    pub(crate) fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(cell) = self.index(x, y).and_then(|i| self.cells.get_mut(i)) {
            *cell = alive;
        }
    }

    /// Count live cells among the up-to-8 in-bounds neighbors of `(x, y)`.
    ///
    /// Sums the clipped 3x3 window around the cell and subtracts the cell
    /// itself.
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        let x_lo = x.saturating_sub(1);
        let y_lo = y.saturating_sub(1);
        let x_hi = x.saturating_add(1).min(self.width.saturating_sub(1));
        let y_hi = y.saturating_add(1).min(self.height.saturating_sub(1));

        let mut count: u8 = 0;
        for ny in y_lo..=y_hi {
            for nx in x_lo..=x_hi {
                if (nx, ny) != (x, y) && self.get(nx, ny) {
                    count = count.saturating_add(1);
                }
            }
        }
        count
    }

    /// Compute the next generation from this board.
    ///
    /// `self` is only read, so every cell sees the same pre-step state
    /// regardless of scan order.
    pub fn next_generation(&self) -> Self {
        let mut next = Self::dead(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = matches!(
                    (self.get(x, y), self.neighbor_count(x, y)),
                    (true, 2 | 3) | (false, 3)
                );
                next.set(x, y, alive);
            }
        }
        next
    }

    /// Iterate live cells as `(x, y)` pairs, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| {
                (
                    i.checked_rem(width).unwrap_or(0),
                    i.checked_div(width).unwrap_or(0),
                )
            })
    }

    /// Return the number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Whether the board has no live cells.
    pub fn is_extinct(&self) -> bool {
        !self.cells.contains(&true)
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        y.checked_mul(self.width)?.checked_add(x)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn board_with(width: usize, height: usize, live: &[(usize, usize)]) -> Board {
        let mut board = Board::dead(width, height);
        for &(x, y) in live {
            board.set(x, y, true);
        }
        board
    }

    #[test]
    fn new_board_is_dead() {
        let board = Board::dead(4, 3);
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.live_count(), 0);
        assert!(board.is_extinct());
    }

    #[test]
    fn contains_rejects_negative_and_overflowing() {
        let board = Board::dead(3, 2);
        assert!(board.contains(0, 0));
        assert!(board.contains(2, 1));
        assert!(!board.contains(-1, 0));
        assert!(!board.contains(0, -1));
        assert!(!board.contains(3, 0));
        assert!(!board.contains(0, 2));
        assert!(!board.contains(i64::MIN, i64::MAX));
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbors() {
        let full = board_with(
            3,
            3,
            &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)],
        );
        assert_eq!(full.neighbor_count(0, 0), 3);
        assert_eq!(full.neighbor_count(1, 0), 5);
        assert_eq!(full.neighbor_count(1, 1), 8);
        assert_eq!(full.neighbor_count(2, 2), 3);
    }

    #[test]
    fn edges_do_not_wrap() {
        // A live cell on the far right must not count toward the far left.
        let board = board_with(5, 5, &[(4, 2)]);
        assert_eq!(board.neighbor_count(0, 2), 0);
        assert_eq!(board.neighbor_count(3, 2), 1);
    }

    #[test]
    fn single_column_board() {
        let board = board_with(1, 3, &[(0, 0), (0, 2)]);
        assert_eq!(board.neighbor_count(0, 1), 2);
        assert_eq!(board.neighbor_count(0, 0), 0);
    }

    #[test]
    fn live_cells_are_row_major() {
        let board = board_with(3, 3, &[(2, 0), (0, 1), (1, 2)]);
        let cells: Vec<_> = board.live_cells().collect();
        assert_eq!(cells, vec![(2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn block_is_still_life() {
        let block = board_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(block.next_generation(), block);
    }

    #[test]
    fn next_generation_leaves_source_untouched() {
        let board = board_with(3, 3, &[(0, 0)]);
        let snapshot = board.clone();
        let next = board.next_generation();
        assert_eq!(board, snapshot);
        assert!(next.is_extinct());
    }
}
