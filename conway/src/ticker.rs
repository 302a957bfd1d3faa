// ticker.rs - Cancellable repeating task on a tokio runtime

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Calls a closure once per period until cancelled.
///
/// The first call happens one full period after [`Ticker::spawn`]. A tick
/// that runs late pushes the following ones back instead of bursting to
/// catch up. Dropping the ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let first = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });
        Self { period, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stops future ticks. A tick already executing on another worker
    /// thread is allowed to finish.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
