//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! terminal renderer and the event pipeline can all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (0, 0), the top-left anchor of the piece matrix
//!
//! # Pacing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 100 | Period of the `Tick` action |
//! | `INITIAL_SPEED` | 6 | Speed countdown at game start |
//! | `SPEED_BASE` | 6 | Speed is reset to `SPEED_BASE - level` after a fall |
//! | `MAX_LEVEL` | 5 | Level cap |
//! | `LEVEL_SCORE_STEP` | 5 | Level `n` is left once score reaches `n * 5` |
//!
//! A tick only moves the falling piece once the speed countdown has dropped
//! below the current level, so at level 1 the piece falls every sixth tick and
//! at level 5 on every tick.
//!
//! # Examples
//!
//! ```
//! use frp_tetris_types::{Action, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(4), Some(PieceKind::I));
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Speed countdown a fresh game starts with.
pub const INITIAL_SPEED: u8 = 6;

/// Base used to reset the speed countdown after every real fall.
pub const SPEED_BASE: u8 = 6;

/// First level of a game.
pub const MIN_LEVEL: u8 = 1;

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 5;

/// Score needed per level before the next level is reached.
pub const LEVEL_SCORE_STEP: u32 = 5;

/// Rotation value every piece carries. Rotation is never applied.
pub const DEFAULT_ROTATION: u8 = 1;

/// Number of shapes in the piece catalog.
pub const CATALOG_LEN: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_defaults() {
        assert_eq!(DEFAULT_TICK_MS, 100);
        assert_eq!(INITIAL_SPEED, 6);
        assert_eq!(SPEED_BASE - MAX_LEVEL, 1);
        assert_eq!(LEVEL_SCORE_STEP, 5);
        assert_eq!(PieceKind::ALL.len(), CATALOG_LEN);
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(CATALOG_LEN), None);
    }
}

/// The five catalog shapes
///
/// - **O**: 2x2 square
/// - **T**: T-shaped, 3x3 matrix
/// - **Z**: skew piece, 3x3 matrix
/// - **L**: L-shaped, 3x3 matrix
/// - **I**: straight bar, 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    T,
    Z,
    L,
    I,
}

impl PieceKind {
    /// Catalog order. Selector indices map onto this array.
    pub const ALL: [PieceKind; CATALOG_LEN] = [
        PieceKind::O,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::I,
    ];

    /// Look up a kind by catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this kind in the catalog
    pub fn index(&self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::T => 1,
            PieceKind::Z => 2,
            PieceKind::L => 3,
            PieceKind::I => 4,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use frp_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("o"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("I"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("s"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::I => "i",
        }
    }
}

/// Actions folded into the game state.
///
/// `Tick` comes from the timer, the others from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Timer tick: let the falling piece descend (subject to the speed throttle)
    Tick,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Put the falling piece into the inventory, or swap it with the held one
    Hold,
}

impl Action {
    /// Parse the log name of an action (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use frp_tetris_types::Action;
    ///
    /// assert_eq!(Action::from_str("tick"), Some(Action::Tick));
    /// assert_eq!(Action::from_str("moveRight"), Some(Action::MoveRight));
    /// assert_eq!(Action::from_str("HOLD"), Some(Action::Hold));
    /// assert_eq!(Action::from_str("rotate"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tick" => Some(Action::Tick),
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "hold" => Some(Action::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string (used by the transition log)
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Tick => "tick",
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::Hold => "hold",
        }
    }
}

/// Piece palette.
///
/// Colors are picked by the size of a shape's matrix, not by kind:
/// 2 → yellow, 3 → purple, 4 → blue, anything else → black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Black,
    Yellow,
    Purple,
    Blue,
}

impl Color {
    /// Palette lookup by matrix size
    ///
    /// # Examples
    ///
    /// ```
    /// use frp_tetris_types::Color;
    ///
    /// assert_eq!(Color::for_matrix_size(2), Color::Yellow);
    /// assert_eq!(Color::for_matrix_size(4), Color::Blue);
    /// assert_eq!(Color::for_matrix_size(7), Color::Black);
    /// ```
    pub fn for_matrix_size(size: usize) -> Self {
        match size {
            2 => Color::Yellow,
            3 => Color::Purple,
            4 => Color::Blue,
            _ => Color::Black,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Blue => "blue",
        }
    }
}

/// A cell on the game board: 0 = empty, 1 = filled.
pub type Cell = u8;
