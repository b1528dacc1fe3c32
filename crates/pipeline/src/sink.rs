//! Render sinks: where committed states go.

use anyhow::Result;

use crate::core::GameState;

/// Receives every committed state, in order. A sink cannot send actions back.
pub trait RenderSink {
    fn render(&mut self, state: &GameState) -> Result<()>;
}

/// Collects every state (tests, replays).
impl RenderSink for Vec<GameState> {
    fn render(&mut self, state: &GameState) -> Result<()> {
        self.push(*state);
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _state: &GameState) -> Result<()> {
        Ok(())
    }
}
