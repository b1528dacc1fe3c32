//! Pipeline tests - action merging, stop rule and transition log
//!
//! Timer-driven tests run on a paused clock so ticks are exact.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::Instant;

use frp_tetris::core::{Board, GameState};
use frp_tetris::pipeline::{
    run_pipeline, scan_actions, ActionSource, NullSink, RenderSink, StopReason, TransitionLog,
};
use frp_tetris::types::{Action, PieceKind};

const PERIOD: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct LoggedPiece {
    kind: String,
    x: i8,
}

#[derive(Debug, Deserialize)]
struct LoggedTransition {
    seq: u64,
    action: String,
    game_over: bool,
    reservable: bool,
    current: LoggedPiece,
    inventory: Option<LoggedPiece>,
    board: Vec<String>,
}

/// Ends the game on its first real tick.
fn doomed() -> GameState {
    let mut board = Board::new();
    board.set(0, 0, 1);
    GameState {
        board,
        speed: 0,
        ..GameState::new(9)
    }
}

/// Fails once `limit` frames have been drawn.
struct FailingSink {
    limit: usize,
    drawn: usize,
}

impl RenderSink for FailingSink {
    fn render(&mut self, _state: &GameState) -> anyhow::Result<()> {
        self.drawn += 1;
        if self.drawn > self.limit {
            anyhow::bail!("terminal gone");
        }
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_stops_after_game_over() {
    let (tx, rx) = mpsc::channel(8);
    let mut source = ActionSource::new(PERIOD, rx);
    let mut states: Vec<GameState> = Vec::new();

    let outcome = run_pipeline(doomed(), &mut source, &mut states, None)
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::GameOver);
    assert_eq!(outcome.applied, 1);
    assert_eq!(states.len(), 1);
    assert!(states[0].game_over);

    // Keys sent after game over stay queued; nothing pulls them
    tx.send(Action::MoveRight).await.unwrap();
    let mut keys = source.into_keys();
    assert_eq!(keys.try_recv().ok(), Some(Action::MoveRight));
}

#[tokio::test(start_paused = true)]
async fn test_terminal_initial_state_applies_nothing() {
    let (_tx, rx) = mpsc::channel(8);
    let mut source = ActionSource::new(PERIOD, rx);
    let over = GameState {
        game_over: true,
        ..GameState::new(1)
    };
    let mut states: Vec<GameState> = Vec::new();

    let outcome = run_pipeline(over, &mut source, &mut states, None)
        .await
        .unwrap();
    assert_eq!(outcome.applied, 0);
    assert!(states.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_keys_processed_in_order() {
    let (tx, rx) = mpsc::channel(8);
    for a in [Action::MoveRight, Action::MoveRight, Action::MoveLeft, Action::Hold] {
        tx.send(a).await.unwrap();
    }
    drop(tx);

    let initial = GameState::new(11);
    let mut source = ActionSource::new(PERIOD, rx);
    let mut states: Vec<GameState> = Vec::new();
    let outcome = run_pipeline(initial, &mut source, &mut states, None)
        .await
        .unwrap();

    assert_eq!(outcome.reason, StopReason::Quit);
    assert_eq!(outcome.applied, 4);
    let xs: Vec<i8> = states.iter().map(|s| s.current.x).collect();
    assert_eq!(xs, vec![1, 2, 1, 0]);
    assert_eq!(
        states,
        scan_actions(
            initial,
            [Action::MoveRight, Action::MoveRight, Action::MoveLeft, Action::Hold]
        )
    );
}

#[tokio::test(start_paused = true)]
async fn test_tick_timing_drives_fall() {
    let (tx, rx) = mpsc::channel(8);
    let mut source = ActionSource::new(PERIOD, rx);
    let start = Instant::now();

    let handle = tokio::spawn(async move {
        let mut states: Vec<GameState> = Vec::new();
        let outcome = run_pipeline(GameState::new(11), &mut source, &mut states, None).await;
        (outcome, states)
    });

    // Seven ticks: six throttled, then the first real fall
    tokio::time::sleep_until(start + PERIOD * 7 + Duration::from_millis(50)).await;
    drop(tx);

    let (outcome, states) = handle.await.unwrap();
    let outcome = outcome.unwrap();
    assert_eq!(outcome.reason, StopReason::Quit);
    assert_eq!(states.len(), 7);
    assert!(states[..6].iter().all(|s| s.current.y == 0));
    assert_eq!(states[6].current.y, 1);
}

#[tokio::test(start_paused = true)]
async fn test_sink_error_aborts() {
    let (_tx, rx) = mpsc::channel(8);
    let mut source = ActionSource::new(PERIOD, rx);
    let mut sink = FailingSink { limit: 2, drawn: 0 };

    let result = run_pipeline(GameState::new(1), &mut source, &mut sink, None).await;
    assert!(result.is_err());
    assert_eq!(sink.drawn, 3);
}

#[tokio::test(start_paused = true)]
async fn test_null_sink_runs_to_game_over() {
    let (_tx, rx) = mpsc::channel(8);
    let mut source = ActionSource::new(PERIOD, rx);
    let outcome = run_pipeline(doomed(), &mut source, &mut NullSink, None)
        .await
        .unwrap();
    assert!(outcome.state.game_over);
}

#[test]
fn test_transition_log_writes_json_lines() {
    let path = std::env::temp_dir().join(format!(
        "frp-tetris-log-{}-{}.jsonl",
        std::process::id(),
        line!()
    ));
    let _ = std::fs::remove_file(&path);

    let initial = GameState::new(3);
    tokio_test::block_on(async {
        let (tx, rx) = mpsc::channel(8);
        tx.send(Action::MoveRight).await.unwrap();
        tx.send(Action::Hold).await.unwrap();
        drop(tx);

        let log = TransitionLog::open(&path).await.unwrap();
        let mut source = ActionSource::new(Duration::from_secs(3600), rx);
        run_pipeline(initial, &mut source, &mut NullSink, Some(&log))
            .await
            .unwrap();
        log.finish().await.unwrap();
    });

    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    let lines: Vec<LoggedTransition> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].seq, 1);
    let actions: Vec<Option<Action>> = lines
        .iter()
        .map(|l| Action::from_str(&l.action))
        .collect();
    assert_eq!(actions, vec![Some(Action::MoveRight), Some(Action::Hold)]);
    assert_eq!(
        PieceKind::from_str(&lines[0].current.kind),
        Some(initial.current.kind)
    );
    assert_eq!(lines[0].current.x, 1);
    assert!(lines[0].inventory.is_none());
    assert_eq!(
        lines[1].inventory.as_ref().and_then(|p| PieceKind::from_str(&p.kind)),
        Some(initial.current.kind)
    );
    assert!(!lines[1].reservable);
    assert_eq!(lines[1].inventory.as_ref().map(|p| p.x), Some(0));
    assert_eq!(
        lines[1].inventory.as_ref().map(|p| p.kind.as_str()),
        Some(lines[0].current.kind.as_str())
    );
    assert_eq!(lines[1].board.len(), 20);
    assert!(!lines[1].game_over);
}
