//! Board module - settled cells and the row-clearing operations
//!
//! The board is a 10x20 occupancy grid (0 = empty, 1 = filled) stored as a flat
//! row-major array. Coordinates: (x, y) where x ranges 0..9 (left to right) and
//! y ranges 0..19 (top to bottom). Only settled pieces live here; the falling
//! piece is stamped in when it locks.
//!
//! Every operation takes `&self` and returns a new `Board`.

use arrayvec::ArrayVec;

use crate::piece::PieceInstance;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

const WIDTH: usize = GRID_WIDTH as usize;
const HEIGHT: usize = GRID_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// One flag per row, top to bottom: 1 = row completely filled
pub type RowFlags = [u8; HEIGHT];

/// The game board - 10 columns x 20 rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Cell at (x, y), `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false (and does nothing) when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(1))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&c| c == 1)
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Board with the piece's occupied cells filled in.
    ///
    /// Cells that fall outside the grid are dropped; callers only stamp pieces
    /// that the fall check has kept on the board.
    pub fn stamp(&self, piece: &PieceInstance) -> Board {
        let mut out = *self;
        for (x, y) in piece.cells() {
            out.set(x, y, 1);
        }
        out
    }

    /// Flag every completely filled row
    pub fn completed_rows(&self) -> RowFlags {
        let mut flags = [0u8; HEIGHT];
        for (y, flag) in flags.iter_mut().enumerate() {
            if self.is_row_full(y) {
                *flag = 1;
            }
        }
        flags
    }

    /// Board with every flagged row removed and the rows above shifted down.
    ///
    /// Rows are copied bottom-up into a fresh board, so any number of cleared
    /// rows (adjacent or not) is handled in one pass and the vacated top rows
    /// stay empty.
    pub fn compact(&self, flags: &RowFlags) -> Board {
        let mut out = Board::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if flags[read_y] == 1 {
                continue;
            }
            write_y -= 1;
            let src = read_y * WIDTH;
            let dst = write_y * WIDTH;
            out.cells[dst..dst + WIDTH].copy_from_slice(&self.cells[src..src + WIDTH]);
        }

        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as text, `#` for filled and `.` for empty
    pub fn row_string(&self, y: usize) -> String {
        if y >= HEIGHT {
            return String::new();
        }
        self.row(y)
            .iter()
            .map(|&c| if c == 1 { '#' } else { '.' })
            .collect()
    }

    /// Build a board from text rows aligned to the bottom of the grid.
    ///
    /// `#` marks a filled cell, anything else is empty. Extra rows at the top
    /// and extra columns on the right are ignored.
    pub fn from_rows(rows: &[&str]) -> Board {
        let mut board = Board::new();
        let skip = rows.len().saturating_sub(HEIGHT);
        let start_y = HEIGHT - (rows.len() - skip);
        for (dy, line) in rows.iter().skip(skip).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                if ch == '#' {
                    board.set(x as i8, (start_y + dy) as i8, 1);
                }
            }
        }
        board
    }
}

/// Indices of the flagged rows, top to bottom
pub fn completed_row_indices(flags: &RowFlags) -> ArrayVec<usize, HEIGHT> {
    flags
        .iter()
        .enumerate()
        .filter(|&(_, &f)| f == 1)
        .map(|(y, _)| y)
        .collect()
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_stamp_leaves_original_untouched() {
        let board = Board::new();
        let piece = PieceInstance {
            x: 4,
            y: 18,
            ..PieceInstance::new(PieceKind::O)
        };
        let stamped = board.stamp(&piece);

        assert_eq!(board.filled_count(), 0);
        assert_eq!(stamped.filled_count(), 4);
        assert!(stamped.is_occupied(4, 18));
        assert!(stamped.is_occupied(5, 19));
    }

    #[test]
    fn test_stamp_drops_off_board_cells() {
        let piece = PieceInstance {
            x: 9,
            y: 19,
            ..PieceInstance::new(PieceKind::O)
        };
        let stamped = Board::new().stamp(&piece);
        assert_eq!(stamped.filled_count(), 1);
        assert!(stamped.is_occupied(9, 19));
    }

    #[test]
    fn test_from_rows_is_bottom_aligned() {
        let board = Board::from_rows(&["#.........", "##########"]);
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(1, 18));
        assert!(board.is_row_full(19));
        assert_eq!(board.row_string(18), "#.........");
    }

    #[test]
    fn test_completed_row_indices() {
        let board = Board::from_rows(&["##########", "#########.", "##########"]);
        let flags = board.completed_rows();
        assert_eq!(completed_row_indices(&flags).as_slice(), &[17, 19]);
    }
}
