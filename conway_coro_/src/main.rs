// main.rs - Desktop surface for the Game of Life simulation

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway::{GameOfLifeInterface, Pattern, Simulation, Snapshot};
use eframe::egui;
use egui::Color32;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod ui;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = args::Args::parse();
    let config = args.config().context("invalid configuration")?;

    // One worker: every step runs on the same thread of control.
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("conway-driver")
        .enable_time()
        .build()
        .context("failed to build tokio runtime")?;

    let sim = Simulation::new(config, runtime.handle().clone())?;
    if let Some(name) = &args.pattern {
        sim.apply_pattern(Pattern::find(name)?)?;
    } else if let Some(seed) = args.seed {
        sim.randomize(seed)?;
    }
    let seed = args.initial_seed();
    info!(rows = config.rows, cols = config.cols, period_ms = args.period_ms, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(GameOfLife::new(cc.egui_ctx.clone(), sim, runtime, seed))),
    )
    .map_err(|err| anyhow!("window closed with error: {err}"))
}

/// The egui surface. It reads the grid only through published snapshots and
/// changes it only through [`GameOfLifeInterface`] commands.
pub struct GameOfLife {
    sim: Simulation,
    view: watch::Receiver<Snapshot>,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    seed: u64,
    // Dropped after `sim` so the driver is cancelled while its runtime lives.
    _runtime: Runtime,
}

impl GameOfLife {
    fn new(ctx: egui::Context, sim: Simulation, runtime: Runtime, seed: u64) -> Self {
        let view = sim.subscribe();

        // Repaint whenever the simulation publishes, ending once it is gone.
        let mut updates = sim.subscribe();
        runtime.spawn(async move {
            while updates.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        Self {
            sim,
            view,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            seed,
            _runtime: runtime,
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(1);
        self.seed
    }
}

impl Drop for GameOfLife {
    fn drop(&mut self) {
        self.sim.shutdown();
        info!("surface closed");
    }
}
