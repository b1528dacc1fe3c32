//! The merged action stream: timer ticks plus key actions.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::types::Action;

/// Yields actions in arrival order. Queued keys win over a tick that is due at
/// the same time.
///
/// Must be created inside a tokio runtime.
pub struct ActionSource {
    ticks: Interval,
    keys: mpsc::Receiver<Action>,
}

impl ActionSource {
    /// First tick fires one `period` after creation.
    pub fn new(period: Duration, keys: mpsc::Receiver<Action>) -> Self {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { ticks, keys }
    }

    /// Next action, or `None` once every key sender is gone.
    pub async fn next(&mut self) -> Option<Action> {
        tokio::select! {
            biased;
            key = self.keys.recv() => key,
            _ = self.ticks.tick() => Some(Action::Tick),
        }
    }

    /// Hand the key receiver back (e.g. to wait for quit after game over).
    pub fn into_keys(self) -> mpsc::Receiver<Action> {
        self.keys
    }
}
