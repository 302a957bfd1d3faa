// error.rs - Rejected operations on the grid and the driver

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("step period must be greater than zero")]
    ZeroPeriod,
    #[error("grid is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("no pattern named {0:?}")]
    UnknownPattern(String),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;
