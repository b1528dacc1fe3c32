//! Opt-in JSON-lines transition log.
//!
//! One line per applied action. Records go through an unbounded channel to a
//! writer task, so logging never blocks the fold.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameState, PieceInstance};
use crate::types::{Action, GRID_HEIGHT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceRecord {
    pub kind: &'static str,
    pub x: i8,
    pub y: i8,
    pub color: &'static str,
}

impl From<&PieceInstance> for PieceRecord {
    fn from(piece: &PieceInstance) -> Self {
        Self {
            kind: piece.kind.as_str(),
            x: piece.x,
            y: piece.y,
            color: piece.color.as_str(),
        }
    }
}

/// The state after one action, flattened for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub seq: u64,
    pub action: &'static str,
    pub game_over: bool,
    pub score: u32,
    pub level: u8,
    pub highscore: u32,
    pub speed: u8,
    pub reservable: bool,
    pub current: PieceRecord,
    pub next: PieceRecord,
    pub inventory: Option<PieceRecord>,
    /// Board rows top to bottom, `#` filled and `.` empty
    pub board: Vec<String>,
}

impl TransitionRecord {
    pub fn new(seq: u64, action: Action, state: &GameState) -> Self {
        Self {
            seq,
            action: action.as_str(),
            game_over: state.game_over,
            score: state.score,
            level: state.level,
            highscore: state.highscore,
            speed: state.speed,
            reservable: state.reservable,
            current: PieceRecord::from(&state.current),
            next: PieceRecord::from(&state.next),
            inventory: state.inventory.as_ref().map(PieceRecord::from),
            board: (0..GRID_HEIGHT as usize)
                .map(|y| state.board.row_string(y))
                .collect(),
        }
    }
}

pub struct TransitionLog {
    tx: mpsc::UnboundedSender<TransitionRecord>,
    writer: JoinHandle<Result<()>>,
}

impl TransitionLog {
    /// Open (append) `path` and start the writer task.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening transition log {}", path.display()))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<TransitionRecord>();
        let writer = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(4096);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                serde_json::to_writer(&mut buf, &rec)?;
                buf.push(b'\n');
                file.write_all(&buf).await?;
            }
            file.flush().await?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(Self { tx, writer })
    }

    /// Queue one record. Dropped silently if the writer has already failed.
    pub fn record(&self, seq: u64, action: Action, state: &GameState) {
        let _ = self.tx.send(TransitionRecord::new(seq, action, state));
    }

    /// Close the channel and wait for everything to reach the file.
    pub async fn finish(self) -> Result<()> {
        drop(self.tx);
        self.writer.await.context("transition log writer panicked")?
    }
}
