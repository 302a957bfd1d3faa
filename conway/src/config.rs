// config.rs - Grid dimensions and step period

use std::time::Duration;

use crate::error::{LifeError, Result};
use crate::grid;

pub const GRID_SIZE: usize = 50; // Default playing area is GRID_SIZE x GRID_SIZE
pub const STEP_PERIOD_MS: u64 = 100;

/// Everything the driver needs to know up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: GRID_SIZE,
            cols: GRID_SIZE,
            period: Duration::from_millis(STEP_PERIOD_MS),
        }
    }
}

impl Config {
    pub fn new(rows: usize, cols: usize, period_ms: u64) -> Result<Self> {
        let config = Self {
            rows,
            cols,
            period: Duration::from_millis(period_ms),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        grid::buffer_len(self.rows, self.cols)?;
        if self.period.is_zero() {
            return Err(LifeError::ZeroPeriod);
        }
        Ok(())
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
