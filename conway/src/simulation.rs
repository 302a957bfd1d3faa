// simulation.rs - Owns the authoritative grid and drives it on a timer

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, trace};

use crate::config::Config;
use crate::error::{LifeError, Result};
use crate::grid::Grid;
use crate::patterns::Pattern;
use crate::ticker::Ticker;

/// What observers see after every change.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub running: bool,
    pub generation: u64,
    session: u64,
}

/// Commands a surface may issue against the simulation.
pub trait GameOfLifeInterface {
    fn start(&mut self);
    fn stop(&mut self);
    fn toggle(&self, row: usize, col: usize) -> Result<()>;
    fn clear(&self);
    fn apply_pattern(&self, pattern: &Pattern) -> Result<()>;
    fn randomize(&self, seed: u64) -> Result<()>;

    fn is_running(&self) -> bool;

    fn toggle_running(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }
}

/// Grid state plus the periodic driver that advances it.
///
/// Every change is a single replacement of the published [`Snapshot`] inside
/// the watch channel's write lock, so a step and a toggle never interleave
/// and readers never see half of either.
pub struct Simulation {
    config: Config,
    runtime: Handle,
    state: Arc<watch::Sender<Snapshot>>,
    ticker: Option<Ticker>,
    sessions: u64,
}

impl Simulation {
    /// A stopped simulation over an all-dead grid.
    pub fn new(config: Config, runtime: Handle) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.cols)?;
        Self::with_grid(config, grid, runtime)
    }

    /// A stopped simulation seeded with `grid`, which must match the
    /// configured dimensions.
    pub fn with_grid(config: Config, grid: Grid, runtime: Handle) -> Result<Self> {
        config.validate()?;
        check_dimensions(&config, &grid)?;
        let (state, _) = watch::channel(Snapshot {
            grid: Arc::new(grid),
            running: false,
            generation: 0,
            session: 0,
        });
        Ok(Self {
            config,
            runtime,
            state: Arc::new(state),
            ticker: None,
            sessions: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn period(&self) -> Duration {
        self.config.period
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.state.borrow().grid)
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Changes the step period. A running driver restarts its timer, so the
    /// next step is one new period away.
    pub fn set_period(&mut self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(LifeError::ZeroPeriod);
        }
        self.config.period = period;
        if let Some(old) = self.ticker.take() {
            old.cancel();
            self.spawn_ticker();
        }
        debug!(period_ms = period.as_millis() as u64, "step period changed");
        Ok(())
    }

    /// Replaces the grid with a caller-built one of the same dimensions.
    pub fn load(&self, grid: Grid) -> Result<()> {
        check_dimensions(&self.config, &grid)?;
        self.replace(grid, "loaded grid");
        Ok(())
    }

    /// Stops the driver for good; call when the owning surface goes away.
    pub fn shutdown(&mut self) {
        self.stop();
        info!("simulation shut down");
    }

    fn spawn_ticker(&mut self) {
        self.sessions += 1;
        let session = self.sessions;
        // Retiming a running driver changes nothing observers can see.
        self.state.send_if_modified(|s| {
            s.session = session;
            !std::mem::replace(&mut s.running, true)
        });
        let state = Arc::clone(&self.state);
        self.ticker = Some(Ticker::spawn(&self.runtime, self.config.period, move || {
            advance(&state, session)
        }));
    }

    fn replace(&self, grid: Grid, what: &'static str) {
        let alive = grid.live_count();
        self.state.send_modify(|s| {
            s.grid = Arc::new(grid);
            s.generation = 0;
        });
        debug!(alive, "{what}");
    }
}

impl GameOfLifeInterface for Simulation {
    fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("start ignored, already running");
            return;
        }
        self.spawn_ticker();
        info!(period_ms = self.config.period.as_millis() as u64, "simulation started");
    }

    fn stop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        ticker.cancel();
        // A tick racing this call sees `running == false` under the same lock.
        self.state.send_modify(|s| s.running = false);
        info!(generation = self.generation(), "simulation stopped");
    }

    fn toggle(&self, row: usize, col: usize) -> Result<()> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|s| match s.grid.toggled(row, col) {
            Ok(next) => {
                s.grid = Arc::new(next);
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        if outcome.is_ok() {
            debug!(row, col, "cell toggled");
        }
        outcome
    }

    fn clear(&self) {
        let blank = self.state.borrow().grid.cleared();
        self.replace(blank, "grid cleared");
    }

    fn apply_pattern(&self, pattern: &Pattern) -> Result<()> {
        let grid = pattern.place(self.config.rows, self.config.cols)?;
        self.replace(grid, pattern.name);
        Ok(())
    }

    fn randomize(&self, seed: u64) -> Result<()> {
        let grid = Grid::random(self.config.rows, self.config.cols, seed)?;
        self.replace(grid, "random fill");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advance(state: &watch::Sender<Snapshot>, session: u64) {
    state.send_if_modified(|s| {
        if !s.running || s.session != session {
            return false;
        }
        s.grid = Arc::new(s.grid.step());
        s.generation += 1;
        trace!(generation = s.generation, alive = s.grid.live_count(), "stepped");
        true
    });
}

fn check_dimensions(config: &Config, grid: &Grid) -> Result<()> {
    if grid.dimensions() != config.dimensions() {
        return Err(LifeError::DimensionMismatch {
            expected: config.dimensions(),
            actual: grid.dimensions(),
        });
    }
    Ok(())
}
