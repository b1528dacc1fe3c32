//! Property tests: invariants that hold for any seed and any action script.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use frp_tetris::core::{reduce, GameState};
use frp_tetris::pipeline::scan_actions;
use frp_tetris::types::{Action, GRID_HEIGHT, GRID_WIDTH, MAX_LEVEL, MIN_LEVEL, SPEED_BASE};

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => Just(Action::Tick),
        2 => Just(Action::MoveLeft),
        2 => Just(Action::MoveRight),
        1 => Just(Action::Hold),
    ]
}

fn check_step_invariants(prev: &GameState, next: &GameState) -> Result<(), TestCaseError> {
    prop_assert!(next.score >= prev.score, "score went down");
    prop_assert!(next.highscore >= prev.highscore, "highscore went down");
    prop_assert!(next.highscore >= next.score, "highscore below score");
    prop_assert!(next.level >= prev.level, "level went down");
    prop_assert!((MIN_LEVEL..=MAX_LEVEL).contains(&next.level));
    prop_assert!(next.speed <= SPEED_BASE);
    if prev.game_over {
        prop_assert!(next.game_over, "game_over was cleared");
    }

    let size = next.current.shape().size() as i8;
    prop_assert!(next.current.x >= 0 && next.current.x <= GRID_WIDTH as i8 - size);
    for y in 0..GRID_HEIGHT as usize {
        prop_assert!(!next.board.is_row_full(y), "full row {} left on board", y);
    }
    Ok(())
}

proptest! {
    #[test]
    fn generated_scripts_respect_invariants(
        seed in any::<u32>(),
        script in prop::collection::vec(action(), 1..1500),
    ) {
        let mut state = GameState::new(seed);
        for &a in &script {
            let next = reduce(state, a);
            check_step_invariants(&state, &next)?;
            state = next;
        }
    }

    #[test]
    fn transitions_are_deterministic(
        seed in any::<u32>(),
        script in prop::collection::vec(action(), 1..400),
    ) {
        let a = scan_actions(GameState::new(seed), script.iter().copied());
        let b = scan_actions(GameState::new(seed), script.iter().copied());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn scan_stops_at_first_terminal_state(
        seed in any::<u32>(),
        script in prop::collection::vec(action(), 1..3000),
    ) {
        let states = scan_actions(GameState::new(seed), script.iter().copied());
        if let Some(pos) = states.iter().position(|s| s.game_over) {
            prop_assert_eq!(pos, states.len() - 1);
        } else {
            prop_assert_eq!(states.len(), script.len());
        }
    }

    #[test]
    fn rejected_moves_leave_state_unchanged(
        seed in any::<u32>(),
        script in prop::collection::vec(action(), 0..300),
    ) {
        let state = script.iter().fold(GameState::new(seed), |s, &a| reduce(s, a));
        for a in [Action::MoveLeft, Action::MoveRight] {
            let next = reduce(state, a);
            if next.current.x == state.current.x {
                prop_assert_eq!(next, state);
            } else {
                prop_assert_eq!(next.board, state.board);
                prop_assert_eq!(next.current.y, state.current.y);
            }
        }
    }
}
