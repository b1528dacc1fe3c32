//! Piece instances - a catalog shape placed on the board

use arrayvec::ArrayVec;

use crate::geometry::{palette_color, shape, PieceShape};
use crate::types::{Color, PieceKind, DEFAULT_ROTATION};

/// A piece positioned on the board.
///
/// `x`/`y` are the board coordinates of the shape matrix's top-left corner.
/// `rotation` is carried along but never changes the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceInstance {
    pub kind: PieceKind,
    pub rotation: u8,
    /// Always the palette color for the shape's matrix size
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl PieceInstance {
    /// Fresh piece at the spawn position (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: DEFAULT_ROTATION,
            color: palette_color(kind),
            x: 0,
            y: 0,
        }
    }

    pub fn shape(&self) -> &'static PieceShape {
        shape(self.kind)
    }

    /// Same shape with rotation, color and position back to defaults
    pub fn reset(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: DEFAULT_ROTATION,
            color: palette_color(self.kind),
            x: 0,
            y: 0,
        }
    }

    /// Board coordinates of every occupied cell, in shape traversal order
    pub fn cells(&self) -> ArrayVec<(i8, i8), 16> {
        self.shape()
            .occupied()
            .iter()
            .map(|&(i, j)| (self.x + i, self.y + j))
            .collect()
    }
}
