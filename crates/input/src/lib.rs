//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`] values and filters
//! terminal auto-repeat so one physical press produces one action. Timer ticks
//! are not produced here; they come from the pipeline.

pub mod handler;
pub mod map;

pub use frp_tetris_types as types;

pub use handler::{KeyRepeatFilter, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{handle_key_event, should_quit};
