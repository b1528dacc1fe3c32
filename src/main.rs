//! Terminal runner (default binary).
//!
//! Key presses are read on a plain thread and sent into the pipeline; the
//! pipeline owns the game state and redraws the terminal after every action.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use frp_tetris::core::{validate_catalog, GameState};
use frp_tetris::input::{should_quit, KeyRepeatFilter};
use frp_tetris::pipeline::{
    run_pipeline, ActionSource, Outcome, PipelineConfig, RenderSink, StopReason, TransitionLog,
    KEY_CHANNEL_CAPACITY,
};
use frp_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use frp_tetris::types::Action;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Draws each committed state to the terminal.
struct TerminalSink<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl<'a> TerminalSink<'a> {
    fn new(term: &'a mut TerminalRenderer) -> Self {
        Self {
            term,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
        }
    }
}

impl RenderSink for TerminalSink<'_> {
    fn render(&mut self, state: &GameState) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(state, Viewport::new(w, h), &mut self.fb);
        self.term.present(&self.fb)
    }
}

fn main() -> Result<()> {
    validate_catalog()?;
    let config = PipelineConfig::from_env();
    let rt = Runtime::new()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = rt.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();

    let outcome = result?;
    match outcome.reason {
        StopReason::GameOver => eprintln!(
            "[Pipeline] game over: score {}, highscore {}",
            outcome.state.score, outcome.state.highscore
        ),
        StopReason::Quit => eprintln!(
            "[Pipeline] quit after {} actions: score {}",
            outcome.applied, outcome.state.score
        ),
    }
    Ok(())
}

async fn run(term: &mut TerminalRenderer, config: &PipelineConfig) -> Result<Outcome> {
    let (tx, rx) = mpsc::channel::<Action>(KEY_CHANNEL_CAPACITY);
    let key_release_ms = config.key_release_ms;
    thread::spawn(move || read_keys(tx, KeyRepeatFilter::with_key_release_timeout_ms(key_release_ms)));

    let log = match config.log_path.as_deref() {
        Some(path) => Some(TransitionLog::open(path).await?),
        None => None,
    };

    let initial = config.initial_state();
    let mut sink = TerminalSink::new(term);
    sink.render(&initial)?;

    let mut source = ActionSource::new(config.tick, rx);
    let result = run_pipeline(initial, &mut source, &mut sink, log.as_ref()).await;

    if let Some(log) = log {
        if let Err(e) = log.finish().await {
            eprintln!("[Pipeline] transition log error: {:#}", e);
        }
    }
    let outcome = result?;

    // Keep the final screen up until the user quits.
    if outcome.reason == StopReason::GameOver {
        let mut keys = source.into_keys();
        while keys.recv().await.is_some() {}
    }
    Ok(outcome)
}

/// Blocking input loop. Ends on a quit key, on a read error, or once the
/// pipeline has dropped the receiver.
fn read_keys(tx: mpsc::Sender<Action>, mut filter: KeyRepeatFilter) {
    loop {
        if tx.is_closed() {
            return;
        }
        match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(_) => return,
        }
        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(_) => return,
        };
        if should_quit(key) {
            return;
        }
        if let Some(action) = filter.filter(key, Instant::now()) {
            if tx.blocking_send(action).is_err() {
                return;
            }
        }
    }
}
