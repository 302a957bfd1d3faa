// grid.rs - Grid type for Conway's Game of Life

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LifeError, Result};
use crate::rules::{self, NEIGHBOR_OFFSETS};

const BORDER: usize = 1; // Dead cells padding each side of the active area
pub const MAX_CELLS: usize = 1 << 28; // Upper bound on the padded buffer

/// Length of the padded buffer for a `rows x cols` grid, rejecting empty and
/// oversized dimensions.
pub(crate) fn buffer_len(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::EmptyGrid { rows, cols });
    }
    rows.checked_add(2 * BORDER)
        .zip(cols.checked_add(2 * BORDER))
        .and_then(|(r, c)| r.checked_mul(c))
        .filter(|&total| total <= MAX_CELLS)
        .ok_or(LifeError::GridTooLarge { rows, cols })
}

/// A bounded, fixed-size field of cells.
///
/// Cells live in a row-major buffer that carries a one-cell dead border around
/// the `rows x cols` active area. Neighbor lookups for any active cell stay
/// inside the buffer, and border cells are never written, so cells past the
/// edge always count as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let total = buffer_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; total],
        })
    }

    /// A grid with exactly the listed cells alive. Every cell must be in bounds.
    pub fn from_cells<I>(rows: usize, cols: usize, alive: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(rows, cols)?;
        for (row, col) in alive {
            let idx = grid.checked_index(row, col)?;
            grid.cells[idx] = true;
        }
        Ok(grid)
    }

    /// A reproducible fill where roughly one cell in three is alive.
    pub fn random(rows: usize, cols: usize, seed: u64) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;
        let mut rng = StdRng::seed_from_u64(seed);
        for row in 0..rows {
            for col in 0..cols {
                let idx = grid.index(row, col);
                grid.cells[idx] = rng.random_ratio(1, 3);
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// State of a cell, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.contains(row, col).then(|| self.cells[self.index(row, col)])
    }

    /// Like [`Grid::get`], treating everything outside the grid as dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Number of live cells among the eight around `(row, col)`.
    ///
    /// Panics if the cell is outside the grid.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        self.neighbors_at(self.index(row, col))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[self.index(row, col)])
    }

    /// The next generation. `self` is left untouched.
    pub fn step(&self) -> Grid {
        let mut next = self.cleared();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let idx = self.index(row, col);
                next.cells[idx] = rules::next_state(self.cells[idx], self.neighbors_at(idx));
            }
        }
        next
    }

    /// An all-dead grid of the same dimensions.
    pub fn cleared(&self) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: vec![false; self.cells.len()],
        }
    }

    /// A copy of this grid with one cell flipped.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Grid> {
        let idx = self.checked_index(row, col)?;
        let mut next = self.clone();
        next.cells[idx] = !next.cells[idx];
        Ok(next)
    }

    fn stride(&self) -> usize {
        self.cols + 2 * BORDER
    }

    fn index(&self, row: usize, col: usize) -> usize {
        (row + BORDER) * self.stride() + col + BORDER
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if !self.contains(row, col) {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index(row, col))
    }

    // `idx` must address an active cell so every offset lands in the buffer.
    fn neighbors_at(&self, idx: usize) -> u8 {
        let stride = self.stride() as isize;
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.cells[(idx as isize + dr * stride + dc) as usize])
            .count() as u8
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = if self.cells[self.index(row, col)] { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = LifeError;

    /// Parses the plain-text form written by `Display`. `#`, `O`, `*` and `1`
    /// are live; `.`, `0` and space are dead. Empty lines are skipped.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (n, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .map(|ch| match ch {
                    '#' | 'O' | '*' | '1' => Ok(true),
                    '.' | '0' | ' ' => Ok(false),
                    other => Err(LifeError::Parse {
                        line: n + 1,
                        reason: format!("unexpected character {other:?}"),
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(LifeError::Parse {
                        line: n + 1,
                        reason: format!("row has {} cells, expected {}", row.len(), first.len()),
                    });
                }
            }
            rows.push(row);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let alive = rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(c, _)| (r, c))
        });
        Grid::from_cells(height, width, alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().expect("valid grid text")
    }

    /// Reference count that walks the offsets with explicit bounds checks.
    fn bounded_count(g: &Grid, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                g.get(r, c)
            })
            .filter(|&alive| alive)
            .count() as u8
    }

    #[test]
    fn new_grid_is_all_dead() {
        let g = Grid::new(50, 50).unwrap();
        assert_eq!(g.dimensions(), (50, 50));
        assert_eq!(g.live_count(), 0);
        assert!((0..50).all(|r| (0..50).all(|c| g.get(r, c) == Some(false))));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Grid::new(0, 5), Err(LifeError::EmptyGrid { rows: 0, cols: 5 }));
        assert_eq!(Grid::new(5, 0), Err(LifeError::EmptyGrid { rows: 5, cols: 0 }));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 1),
            Err(LifeError::GridTooLarge { rows: usize::MAX, cols: 1 })
        );
        assert_eq!(
            Grid::new(1 << 20, 1 << 20),
            Err(LifeError::GridTooLarge { rows: 1 << 20, cols: 1 << 20 })
        );
        assert!(Grid::random(usize::MAX - 1, usize::MAX - 1, 0).is_err());
    }

    #[test]
    fn from_cells_rejects_cells_outside() {
        let err = Grid::from_cells(3, 3, [(1, 1), (3, 0)]).unwrap_err();
        assert!(matches!(err, LifeError::OutOfBounds { row: 3, col: 0, .. }));
    }

    #[test]
    fn get_outside_is_none() {
        let g = Grid::new(2, 3).unwrap();
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 3), None);
        assert!(!g.is_alive(10, 10));
    }

    #[test]
    fn blinker_oscillates() {
        let vertical = Grid::from_cells(5, 5, [(1, 2), (2, 2), (3, 2)]).unwrap();
        let horizontal = Grid::from_cells(5, 5, [(2, 1), (2, 2), (2, 3)]).unwrap();

        let once = vertical.step();
        assert_eq!(once, horizontal);
        assert_eq!(once.step(), vertical);
    }

    #[test]
    fn isolated_cell_dies() {
        let g = Grid::from_cells(5, 5, [(2, 2)]).unwrap();
        assert_eq!(g.step().live_count(), 0);
    }

    #[test]
    fn block_is_stable() {
        let g = grid(
            "....\n\
             .##.\n\
             .##.\n\
             ....\n",
        );
        assert_eq!(g.step(), g);
    }

    #[test]
    fn block_in_corner_is_stable() {
        let g = Grid::from_cells(4, 4, [(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(g.step(), g);
    }

    #[test]
    fn edges_do_not_wrap() {
        // On a torus the far column would feed (0, 0) three neighbors.
        let g = Grid::from_cells(5, 5, [(0, 4), (1, 4), (4, 4)]).unwrap();
        assert_eq!(g.live_neighbors(0, 0), 0);
        assert!(!g.step().is_alive(0, 0));
    }

    #[test]
    fn corner_counts_only_three_neighbors() {
        let g = Grid::from_cells(3, 3, (0..3).flat_map(|r| (0..3).map(move |c| (r, c)))).unwrap();
        assert_eq!(g.live_neighbors(0, 0), 3);
        assert_eq!(g.live_neighbors(0, 1), 5);
        assert_eq!(g.live_neighbors(1, 1), 8);
    }

    #[test]
    fn step_follows_rule_for_every_cell() {
        for seed in 0..8 {
            let g = Grid::random(12, 9, seed).unwrap();
            let next = g.step();
            for row in 0..g.rows() {
                for col in 0..g.cols() {
                    let n = bounded_count(&g, row, col);
                    assert_eq!(g.live_neighbors(row, col), n);
                    let expected = if g.is_alive(row, col) { n == 2 || n == 3 } else { n == 3 };
                    assert_eq!(next.is_alive(row, col), expected, "seed {seed} cell ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn step_leaves_input_untouched() {
        let g = Grid::random(10, 10, 7).unwrap();
        let before = g.clone();
        let _ = g.step();
        assert_eq!(g, before);
    }

    #[test]
    fn toggle_flips_exactly_one_cell() {
        let g = Grid::random(6, 7, 3).unwrap();
        let t = g.toggled(4, 5).unwrap();
        for row in 0..6 {
            for col in 0..7 {
                let flipped = (row, col) == (4, 5);
                assert_eq!(t.is_alive(row, col) != g.is_alive(row, col), flipped);
            }
        }
        assert_eq!(t.toggled(4, 5).unwrap(), g);
    }

    #[test]
    fn toggle_outside_is_rejected() {
        let g = Grid::new(3, 3).unwrap();
        let err = g.toggled(0, 3).unwrap_err();
        assert_eq!(
            err,
            LifeError::OutOfBounds { row: 0, col: 3, rows: 3, cols: 3 }
        );
    }

    #[test]
    fn random_is_reproducible() {
        let a = Grid::random(20, 20, 42).unwrap();
        assert_eq!(a, Grid::random(20, 20, 42).unwrap());
        assert!(a.live_count() > 0 && a.live_count() < 400);
    }

    #[test]
    fn live_cells_are_row_major() {
        let g = Grid::from_cells(3, 3, [(2, 0), (0, 2), (1, 1)]).unwrap();
        assert_eq!(g.live_cells().collect::<Vec<_>>(), vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn text_form_parses_and_prints() {
        let g = grid(".#.\nO..\n\n..*\n");
        assert_eq!(g.dimensions(), (3, 3));
        assert_eq!(g.live_cells().collect::<Vec<_>>(), vec![(0, 1), (1, 0), (2, 2)]);
        assert_eq!(g.to_string(), ".#.\n#..\n..#\n");
    }

    #[test]
    fn row_of_spaces_is_a_dead_row() {
        let g = grid("#.#\n   \n#.#\n");
        assert_eq!(g.dimensions(), (3, 3));
        assert_eq!(g.to_string(), "#.#\n...\n#.#\n");
    }

    #[test]
    fn ragged_text_is_rejected() {
        let err = "...\n..\n".parse::<Grid>().unwrap_err();
        assert!(matches!(err, LifeError::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!("\n\n".parse::<Grid>(), Err(LifeError::EmptyGrid { .. })));
    }

    #[test]
    fn bad_character_is_rejected() {
        let err = "..x\n".parse::<Grid>().unwrap_err();
        assert!(matches!(err, LifeError::Parse { line: 1, .. }));
    }
}
