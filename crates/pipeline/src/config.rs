//! Runtime configuration, read from `TETRIS_*` environment variables.

use std::time::Duration;

use crate::core::{GameState, PieceSelector};
use crate::types::DEFAULT_TICK_MS;

/// Default key release timeout for terminals without release events.
pub const DEFAULT_KEY_RELEASE_MS: u64 = 150;

/// Bounded capacity of the key channel.
pub const KEY_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Period of the `Tick` action
    pub tick: Duration,
    /// Selector seed; `None` seeds from the wall clock
    pub seed: Option<u32>,
    /// JSON-lines transition log, disabled when `None`
    pub log_path: Option<String>,
    pub key_release_ms: u64,
    /// Highscore carried over from an earlier run
    pub highscore: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
            log_path: None,
            key_release_ms: DEFAULT_KEY_RELEASE_MS,
            highscore: 0,
        }
    }
}

impl PipelineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PipelineConfig::from_env`], with variables supplied by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let tick_ms = lookup("TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .max(1);

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let key_release_ms = lookup("TETRIS_KEY_RELEASE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.key_release_ms);

        let highscore = lookup("TETRIS_HIGHSCORE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.highscore);

        Self {
            tick: Duration::from_millis(tick_ms),
            seed,
            log_path,
            key_release_ms,
            highscore,
        }
    }

    /// Selector for a new game: the configured seed, or the wall clock.
    pub fn selector(&self) -> PieceSelector {
        match self.seed {
            Some(seed) => PieceSelector::new(seed),
            None => PieceSelector::from_wall_clock(),
        }
    }

    pub fn initial_state(&self) -> GameState {
        GameState::with_highscore(self.selector(), self.highscore)
    }
}
