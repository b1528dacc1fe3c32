//! Board geometry - the static piece catalog
//!
//! Each shape is a square occupancy matrix stored column-major: `cells[i][j]`
//! is the cell `i` columns right of and `j` rows below the piece anchor.
//! Only the leading `size x size` block of the 4x4 storage is meaningful.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Color, PieceKind, CATALOG_LEN, GRID_HEIGHT, GRID_WIDTH};

/// Largest matrix the catalog can hold
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of an occupied cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Immutable occupancy matrix of one catalog shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: usize,
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    const fn new(size: usize, cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self { size, cells }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Matrix value at column `i`, row `j` (0 outside the matrix)
    pub fn get(&self, i: usize, j: usize) -> u8 {
        if i >= self.size || j >= self.size {
            return 0;
        }
        self.cells[i][j]
    }

    /// Occupied offsets in traversal order (column by column, top to bottom)
    pub fn occupied(&self) -> ArrayVec<CellOffset, 16> {
        let mut out = ArrayVec::new();
        for i in 0..self.size {
            for j in 0..self.size {
                if self.cells[i][j] == 1 {
                    out.push((i as i8, j as i8));
                }
            }
        }
        out
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.occupied().len()
    }
}

/// The fixed catalog, in `PieceKind::ALL` order.
pub const CATALOG: [PieceShape; CATALOG_LEN] = [
    // O: 2x2 square
    PieceShape::new(
        2,
        [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    ),
    // T: stem pointing up
    PieceShape::new(
        3,
        [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    ),
    // Z: skew
    PieceShape::new(
        3,
        [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    ),
    // L
    PieceShape::new(
        3,
        [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    ),
    // I: horizontal bar across the third row
    PieceShape::new(
        4,
        [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    ),
];

/// Shape matrix for a piece kind
pub fn shape(kind: PieceKind) -> &'static PieceShape {
    &CATALOG[kind.index()]
}

/// Palette color for a piece kind (by matrix size)
pub fn palette_color(kind: PieceKind) -> Color {
    Color::for_matrix_size(shape(kind).size())
}

/// Catalog defects detected by [`validate_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// Shape has no occupied cell
    EmptyShape(PieceKind),
    /// Matrix size is zero or larger than the storage
    BadSize { kind: PieceKind, size: usize },
    /// A cell is set outside the declared matrix, or holds something other than 0/1
    StrayCell { kind: PieceKind, i: usize, j: usize },
    /// Shape does not fit on the board at the spawn position
    DoesNotFit(PieceKind),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::EmptyShape(kind) => write!(f, "shape {} is empty", kind.as_str()),
            CatalogError::BadSize { kind, size } => {
                write!(f, "shape {} has invalid size {}", kind.as_str(), size)
            }
            CatalogError::StrayCell { kind, i, j } => {
                write!(f, "shape {} has a stray cell at ({}, {})", kind.as_str(), i, j)
            }
            CatalogError::DoesNotFit(kind) => {
                write!(f, "shape {} does not fit on the board", kind.as_str())
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Check the catalog against the board dimensions.
///
/// Run once at startup; the engine assumes a valid catalog afterwards.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for kind in PieceKind::ALL {
        let s = shape(kind);
        if s.size == 0 || s.size > MAX_SHAPE_SIZE {
            return Err(CatalogError::BadSize { kind, size: s.size });
        }
        for i in 0..MAX_SHAPE_SIZE {
            for j in 0..MAX_SHAPE_SIZE {
                let v = s.cells[i][j];
                let inside = i < s.size && j < s.size;
                if v > 1 || (!inside && v != 0) {
                    return Err(CatalogError::StrayCell { kind, i, j });
                }
            }
        }
        if s.cell_count() == 0 {
            return Err(CatalogError::EmptyShape(kind));
        }
        if s.size > GRID_WIDTH as usize || s.size > GRID_HEIGHT as usize {
            return Err(CatalogError::DoesNotFit(kind));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid() {
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(shape(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn occupied_is_column_major() {
        // T: column 0 has (0,1), column 1 has (1,0) and (1,1), column 2 has (2,1)
        let cells = shape(PieceKind::T).occupied();
        assert_eq!(cells.as_slice(), &[(0, 1), (1, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn bar_occupies_third_row() {
        let cells = shape(PieceKind::I).occupied();
        assert_eq!(cells.as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn palette_by_matrix_size() {
        assert_eq!(palette_color(PieceKind::O), Color::Yellow);
        assert_eq!(palette_color(PieceKind::T), Color::Purple);
        assert_eq!(palette_color(PieceKind::Z), Color::Purple);
        assert_eq!(palette_color(PieceKind::L), Color::Purple);
        assert_eq!(palette_color(PieceKind::I), Color::Blue);
    }

    #[test]
    fn get_outside_matrix_is_empty() {
        let o = shape(PieceKind::O);
        assert_eq!(o.get(0, 0), 1);
        assert_eq!(o.get(2, 0), 0);
        assert_eq!(o.get(0, 3), 0);
    }
}
