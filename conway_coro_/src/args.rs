use clap::Parser;
use conway::Config;
use conway::config::{GRID_SIZE, STEP_PERIOD_MS};

/// Conway's Game of Life on a bounded grid.
#[derive(Parser, Debug)]
pub struct Args {
    /// Number of grid rows
    #[arg(short, long, default_value_t = GRID_SIZE)]
    pub rows: usize,
    /// Number of grid columns
    #[arg(short, long, default_value_t = GRID_SIZE)]
    pub cols: usize,
    /// Milliseconds between generations
    #[arg(short, long, default_value_t = STEP_PERIOD_MS)]
    pub period_ms: u64,
    /// Seed the grid with a named pattern (e.g. "glider")
    #[arg(long, conflicts_with = "seed")]
    pub pattern: Option<String>,
    /// Seed the grid with a reproducible random fill
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn config(&self) -> conway::Result<Config> {
        Config::new(self.rows, self.cols, self.period_ms)
    }

    /// Seed for the Random button: the given one, or fresh entropy.
    pub fn initial_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }
}
