//! The fold: pull actions, reduce, publish.

use anyhow::Result;

use crate::core::{reduce, GameState};
use crate::log::TransitionLog;
use crate::sink::RenderSink;
use crate::source::ActionSource;
use crate::types::Action;

/// Why the pipeline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A committed state had `game_over` set
    GameOver,
    /// The key channel closed (the user quit)
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub state: GameState,
    pub reason: StopReason,
    /// Number of actions applied
    pub applied: u64,
}

/// Fold actions from `source` into `initial` until the game is over or the
/// source ends.
///
/// Every committed state is logged (if enabled) and then handed to `sink`.
/// No action is pulled after the first terminal state, so nothing is applied to
/// it. The initial state itself is not rendered.
pub async fn run_pipeline<S>(
    initial: GameState,
    source: &mut ActionSource,
    sink: &mut S,
    log: Option<&TransitionLog>,
) -> Result<Outcome>
where
    S: RenderSink + ?Sized,
{
    let mut state = initial;
    let mut applied = 0u64;

    if state.is_terminal() {
        return Ok(Outcome {
            state,
            reason: StopReason::GameOver,
            applied,
        });
    }

    while let Some(action) = source.next().await {
        state = reduce(state, action);
        applied += 1;

        if let Some(log) = log {
            log.record(applied, action, &state);
        }
        sink.render(&state)?;

        if state.is_terminal() {
            return Ok(Outcome {
                state,
                reason: StopReason::GameOver,
                applied,
            });
        }
    }

    Ok(Outcome {
        state,
        reason: StopReason::Quit,
        applied,
    })
}

/// Synchronous scan over a fixed action sequence with the same stop rule as
/// [`run_pipeline`]: the returned states end at the first terminal one.
pub fn scan_actions<I>(initial: GameState, actions: I) -> Vec<GameState>
where
    I: IntoIterator<Item = Action>,
{
    let mut states = Vec::new();
    if initial.is_terminal() {
        return states;
    }
    let mut state = initial;
    for action in actions {
        state = reduce(state, action);
        states.push(state);
        if state.is_terminal() {
            break;
        }
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    fn doomed() -> GameState {
        let mut board = Board::new();
        board.set(0, 0, 1);
        GameState {
            board,
            speed: 0,
            ..GameState::new(3)
        }
    }

    #[test]
    fn test_scan_stops_at_game_over() {
        let states = scan_actions(doomed(), [Action::MoveRight, Action::Tick, Action::Tick]);
        assert_eq!(states.len(), 2);
        assert!(states[1].game_over);
    }

    #[test]
    fn test_scan_of_terminal_state_is_empty() {
        let over = GameState {
            game_over: true,
            ..GameState::new(3)
        };
        assert!(scan_actions(over, [Action::Tick]).is_empty());
    }

    #[test]
    fn test_scan_counts_throttled_ticks() {
        let states = scan_actions(GameState::new(3), std::iter::repeat(Action::Tick).take(7));
        assert_eq!(states.len(), 7);
        assert_eq!(states[5].current.y, 0);
        assert_eq!(states[6].current.y, 1);
    }
}
