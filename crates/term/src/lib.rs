//! Terminal rendering for the game.
//!
//! Game states are drawn into a plain [`FrameBuffer`] by [`GameView`] (pure, no
//! I/O) and flushed by [`TerminalRenderer`], which diffs against the previous
//! frame. Board cells can be scaled (2 terminal columns per cell by default) to
//! keep the board roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use frp_tetris_core as core;
pub use frp_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{color_rgb, settled_rgb, BoardOrigin, GameView, Viewport, PREVIEW_CELLS};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
