//! Pieces module - tetromino footprints and the falling piece instance
//!
//! Footprints are the SRS spawn (North) states, expressed as `(row, col)` offsets inside
//! the piece's bounding box with row 0 at the top. Every other orientation is derived by
//! rotating about the pivot (see [`crate::srs`]), so only North is tabulated here.
//! Reference: https://tetris.wiki/SRS

use serde::Serialize;

use crate::types::{PieceKind, Rotation};

/// Absolute or box-local `(row, col)` of a single mino
pub type CellPos = (i8, i8);

/// The four minos of a piece
pub type PieceCells = [CellPos; 4];

/// A point on the half-cell lattice: `(row2, col2)` is twice the position of a cell
/// centre. Cell `(r, c)` has its centre at `(2r, 2c)`; the I piece pivots on odd
/// coordinates between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HalfCell {
    pub row2: i16,
    pub col2: i16,
}

impl HalfCell {
    pub const fn new(row2: i16, col2: i16) -> Self {
        Self { row2, col2 }
    }

    /// Centre of a whole cell
    pub fn of_cell((row, col): CellPos) -> Self {
        Self::new(row as i16 * 2, col as i16 * 2)
    }

    pub fn translated(self, dr: i8, dc: i8) -> Self {
        Self::new(self.row2 + dr as i16 * 2, self.col2 + dc as i16 * 2)
    }
}

/// Spawn-state footprint for a piece kind
pub fn footprint(kind: PieceKind) -> PieceCells {
    match kind {
        // Flat bar on the second row of a 4x4 box
        PieceKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
        PieceKind::O => [(0, 1), (0, 2), (1, 1), (1, 2)],
        PieceKind::T => [(0, 1), (1, 0), (1, 1), (1, 2)],
        PieceKind::S => [(0, 1), (0, 2), (1, 0), (1, 1)],
        PieceKind::Z => [(0, 0), (0, 1), (1, 1), (1, 2)],
        PieceKind::J => [(0, 0), (1, 0), (1, 1), (1, 2)],
        PieceKind::L => [(0, 2), (1, 0), (1, 1), (1, 2)],
    }
}

/// Rotation pivot in box-local half-cells
pub fn pivot(kind: PieceKind) -> HalfCell {
    match kind {
        PieceKind::I => HalfCell::new(3, 3),
        PieceKind::O => HalfCell::new(1, 3),
        _ => HalfCell::new(2, 2),
    }
}

/// Side length of the piece's bounding box
pub fn box_size(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I => 4,
        _ => 3,
    }
}

/// Top-left corner of the spawn box on a grid `width` columns wide
pub fn spawn_origin(kind: PieceKind, width: u8) -> CellPos {
    (0, (width as i8 - box_size(kind)) / 2)
}

/// One falling piece instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: Rotation,
    cells: PieceCells,
    pivot: HalfCell,
    locked: bool,
}

impl Tetromino {
    /// Create a piece in its spawn orientation with the box origin at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            cells: footprint(kind),
            pivot: pivot(kind),
            locked: false,
        }
    }

    /// Create a piece at the spawn position of a grid `width` columns wide
    pub fn spawned(kind: PieceKind, width: u8) -> Self {
        let (row, col) = spawn_origin(kind, width);
        Self::new(kind).translated(row, col)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn cells(&self) -> PieceCells {
        self.cells
    }

    pub fn pivot(&self) -> HalfCell {
        self.pivot
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    /// Copy of this piece shifted by `(dr, dc)`
    pub fn translated(&self, dr: i8, dc: i8) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            cell.0 += dr;
            cell.1 += dc;
        }
        Self {
            cells,
            pivot: self.pivot.translated(dr, dc),
            ..*self
        }
    }

    /// Whether one of the piece's minos sits on `(row, col)`
    pub fn occupies(&self, row: i8, col: i8) -> bool {
        self.cells.contains(&(row, col))
    }

    /// Store the result of a successful rotation
    pub fn apply_rotation(&mut self, cells: PieceCells, pivot: HalfCell, rotation: Rotation) {
        debug_assert!(!self.locked, "locked pieces never rotate");
        self.cells = cells;
        self.pivot = pivot;
        self.rotation = rotation;
    }

    /// Lowest row covered by the piece
    pub fn bottom_row(&self) -> i8 {
        self.cells.iter().map(|&(r, _)| r).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprints_have_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let cells = footprint(kind);
            for (i, a) in cells.iter().enumerate() {
                assert!(!cells[i + 1..].contains(a), "{:?} repeats {:?}", kind, a);
                assert!(a.0 < box_size(kind) && a.1 < box_size(kind));
            }
        }
    }

    #[test]
    fn test_spawn_origin_is_centered() {
        assert_eq!(spawn_origin(PieceKind::T, 10), (0, 3));
        assert_eq!(spawn_origin(PieceKind::I, 10), (0, 3));
    }

    #[test]
    fn test_spawned_i_sits_on_second_row() {
        let piece = Tetromino::spawned(PieceKind::I, 10);
        assert_eq!(piece.cells(), [(1, 3), (1, 4), (1, 5), (1, 6)]);
        assert_eq!(piece.pivot(), HalfCell::new(3, 9));
        assert_eq!(piece.rotation(), Rotation::North);
        assert!(!piece.is_locked());
    }

    #[test]
    fn test_spawned_t_occupies_top_rows() {
        let piece = Tetromino::spawned(PieceKind::T, 10);
        assert_eq!(piece.cells(), [(0, 4), (1, 3), (1, 4), (1, 5)]);
        assert_eq!(piece.pivot(), HalfCell::of_cell((1, 4)));
    }

    #[test]
    fn test_translated_moves_pivot_with_cells() {
        let piece = Tetromino::new(PieceKind::J).translated(2, -1);
        assert_eq!(piece.cells()[0], (2, -1));
        assert_eq!(piece.pivot(), HalfCell::new(6, 0));
        assert!(piece.occupies(3, 1));
        assert!(!piece.occupies(0, 0));
        assert_eq!(piece.bottom_row(), 3);
    }
}
