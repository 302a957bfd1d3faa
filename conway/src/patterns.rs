// patterns.rs - Named seed patterns

use tracing::debug;

use crate::error::{LifeError, Result};
use crate::grid::Grid;

/// A shape given as live-cell offsets from its own top-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

impl Pattern {
    /// Looks a pattern up by name, ignoring case.
    pub fn find(name: &str) -> Result<&'static Pattern> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LifeError::UnknownPattern(name.to_owned()))
    }

    /// Height and width of the pattern's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// A fresh grid holding this pattern centred. Cells that fall outside a
    /// grid smaller than the pattern are dropped.
    pub fn place(&self, rows: usize, cols: usize) -> Result<Grid> {
        let (height, width) = self.extent();
        let top = rows.saturating_sub(height) / 2;
        let left = cols.saturating_sub(width) / 2;

        let cells: Vec<_> = self
            .cells
            .iter()
            .map(|&(r, c)| (r + top, c + left))
            .filter(|&(r, c)| r < rows && c < cols)
            .collect();
        if cells.len() < self.cells.len() {
            debug!(
                pattern = self.name,
                clipped = self.cells.len() - cells.len(),
                "pattern does not fit the grid"
            );
        }
        Grid::from_cells(rows, cols, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            assert!(PATTERNS[i + 1..].iter().all(|b| !a.name.eq_ignore_ascii_case(b.name)));
        }
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(Pattern::find("gosper glider gun").unwrap().name, "Gosper Glider Gun");
        assert_eq!(
            Pattern::find("spaceship").unwrap_err(),
            LifeError::UnknownPattern("spaceship".into())
        );
    }

    #[test]
    fn every_pattern_fits_default_grid() {
        for pattern in PATTERNS {
            let grid = pattern.place(50, 50).unwrap();
            assert_eq!(grid.live_count(), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn blinker_is_centred() {
        let grid = Pattern::find("Blinker").unwrap().place(5, 5).unwrap();
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn oversized_pattern_is_clipped() {
        let gun = Pattern::find("Gosper Glider Gun").unwrap();
        assert_eq!(gun.extent(), (9, 36));
        let grid = gun.place(9, 20).unwrap();
        assert!(grid.live_count() < gun.cells.len());
        assert!(grid.live_count() > 0);
    }

    #[test]
    fn pulsar_has_period_three() {
        let start = Pattern::find("Pulsar").unwrap().place(17, 17).unwrap();
        let one = start.step();
        assert_ne!(one, start);
        assert_eq!(one.step().step(), start);
    }

    #[test]
    fn glider_moves_diagonally() {
        let start = Pattern::find("Glider").unwrap().place(10, 10).unwrap();
        let mut g = start.clone();
        for _ in 0..4 {
            g = g.step();
        }
        let shifted: Vec<_> = start.live_cells().map(|(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(g.live_cells().collect::<Vec<_>>(), shifted);
    }
}
