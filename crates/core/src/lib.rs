//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the game rules as a single pure transition function:
//! `(GameState, Action) -> GameState`. There is no I/O, no clock and no
//! mutation of shared state here, which makes it:
//!
//! - **Deterministic**: the piece selector state lives inside `GameState`, so the
//!   same seed and action sequence always produce the same game
//! - **Testable**: every rule is exercised on plain values
//! - **Portable**: the terminal front end and the pipeline only fold actions
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 settled-cell grid, stamping and row compaction
//! - [`game_state`]: the state value and the four transitions
//! - [`geometry`]: the fixed five-shape catalog and its palette
//! - [`piece`]: a shape placed on the board
//! - [`rng`]: LCG-based piece selection
//!
//! # Game Rules
//!
//! - Pieces spawn at (0, 0) and never rotate
//! - A tick only moves the piece once the speed countdown drops below the level
//! - One point per cleared row; the level climbs every 5 points up to 5
//! - Hold is allowed once per lock
//! - The game ends when a tick finds the top-left cell settled
//!
//! # Example
//!
//! ```
//! use frp_tetris_core::{reduce, GameState};
//! use frp_tetris_types::Action;
//!
//! let game = GameState::new(12345);
//! let game = reduce(game, Action::MoveRight);
//! assert_eq!(game.current.x, 1);
//!
//! let held = reduce(game, Action::Hold);
//! assert!(held.inventory.is_some());
//! assert!(!held.reservable);
//! ```

pub mod board;
pub mod game_state;
pub mod geometry;
pub mod piece;
pub mod rng;

pub use frp_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{completed_row_indices, Board, RowFlags};
pub use game_state::GameState;
pub use geometry::{palette_color, shape, validate_catalog, CatalogError, PieceShape, CATALOG};
pub use piece::PieceInstance;
pub use rng::PieceSelector;

use types::Action;

/// Apply one action to a state.
///
/// This is the fold step of the action stream. It never fails: an action that
/// does not apply (a blocked move, a second hold) returns the state unchanged.
pub fn reduce(state: GameState, action: Action) -> GameState {
    state.apply(action)
}
