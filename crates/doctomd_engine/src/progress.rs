use std::time::Duration;

use rand::Rng;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Tuning for the simulated progress indicator.
#[derive(Debug, Clone)]
pub struct TickerSettings {
    /// How often a step fires while the upload request is outstanding.
    pub interval: Duration,
    /// Upper bound of the random step, in percentage points (inclusive).
    pub max_increment: u8,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            max_increment: 10,
        }
    }
}

/// Produces random progress steps on a fixed cadence.
///
/// The ticker is owned by the submission scope and dropped when the request
/// resolves, so the interval is released exactly once on both the success
/// and the failure path.
pub(crate) struct ProgressTicker {
    interval: Interval,
    max_increment: u8,
}

impl ProgressTicker {
    pub(crate) fn new(settings: &TickerSettings) -> Self {
        // Start one period in the future; a plain interval yields its first
        // tick immediately.
        let mut interval = tokio::time::interval_at(
            Instant::now() + settings.interval,
            settings.interval,
        );
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            max_increment: settings.max_increment,
        }
    }

    /// Waits for the next tick, then rolls the random step.
    pub(crate) async fn step(&mut self) -> u8 {
        self.interval.tick().await;
        rand::thread_rng().gen_range(0..=self.max_increment)
    }
}
