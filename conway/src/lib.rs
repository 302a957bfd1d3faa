//! Conway's Game of Life on a bounded grid, with a timer-driven simulation
//! that publishes every change to its observers.

pub mod config;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod simulation;
pub mod ticker;

pub use config::Config;
pub use error::{LifeError, Result};
pub use grid::Grid;
pub use patterns::{PATTERNS, Pattern};
pub use simulation::{GameOfLifeInterface, Simulation, Snapshot};
pub use ticker::Ticker;
