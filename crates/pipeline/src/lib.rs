//! Event pipeline: folds timer ticks and key actions into game states.
//!
//! The pipeline task owns the only live `GameState`. Key actions arrive over a
//! bounded `mpsc` channel, ticks come from a tokio interval, and both are merged
//! by [`ActionSource`]. [`run_pipeline`] applies each action with
//! [`core::reduce`], hands the result to a [`RenderSink`] and stops pulling
//! actions as soon as a state reports game over.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use frp_tetris_core::GameState;
//! use frp_tetris_pipeline::{run_pipeline, ActionSource, StopReason};
//! use frp_tetris_types::Action;
//! use tokio::sync::mpsc;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let outcome = rt.block_on(async {
//!     let (tx, rx) = mpsc::channel(8);
//!     tx.send(Action::MoveRight).await.unwrap();
//!     drop(tx);
//!
//!     let mut source = ActionSource::new(Duration::from_secs(60), rx);
//!     let mut states: Vec<GameState> = Vec::new();
//!     run_pipeline(GameState::new(1), &mut source, &mut states, None).await
//! });
//!
//! let outcome = outcome.unwrap();
//! assert_eq!(outcome.reason, StopReason::Quit);
//! assert_eq!(outcome.state.current.x, 1);
//! ```

pub mod config;
pub mod log;
pub mod runner;
pub mod sink;
pub mod source;

pub use frp_tetris_core as core;
pub use frp_tetris_types as types;

pub use config::{PipelineConfig, DEFAULT_KEY_RELEASE_MS, KEY_CHANNEL_CAPACITY};
pub use log::{PieceRecord, TransitionLog, TransitionRecord};
pub use runner::{run_pipeline, scan_actions, Outcome, StopReason};
pub use sink::{NullSink, RenderSink};
pub use source::ActionSource;
