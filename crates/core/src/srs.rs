//! SRS module - Super Rotation System rotation resolver
//!
//! Rotation is computed geometrically: each mino is turned a quarter about the piece's
//! pivot on the half-cell lattice, which reproduces the SRS rotation states exactly
//! (including the I piece, whose pivot lies between cells). The rotated footprint is
//! then tried at up to five kick offsets, in table order, and the first one that fits
//! wins.
//!
//! The resolver only reads the grid through [`Occupancy`] and never mutates anything;
//! the caller stores the [`RotationOutcome`] on success.
//! Reference: https://tetris.wiki/SRS

use crate::pieces::{CellPos, HalfCell, PieceCells, Tetromino};
use crate::types::{PieceKind, RotateDirection, Rotation};

/// Read-only view of which grid cells a piece may occupy
pub trait Occupancy {
    /// True when `(row, col)` is inside the grid and holds no settled block
    fn is_open(&self, row: i8, col: i8) -> bool;
}

/// SRS wall kick data
///
/// Each entry is an `(x, y)` offset in guideline orientation (x right, y up).
/// Row index: 0→1, 0→3, 1→0, 1→2, 2→1, 2→3, 3→2, 3→0 (0=North, 1=East, 2=South,
/// 3=West). The first entry of every row is the unkicked rotation.
pub type KickTable = [[(i8, i8); 5]; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table (different from JLSTZ)
pub const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Row of the kick table for a transition between adjacent orientations
fn transition_index(from: Rotation, to: Rotation) -> usize {
    use Rotation::*;

    match (from, to) {
        (North, East) => 0,
        (North, West) => 1,
        (East, North) => 2,
        (East, South) => 3,
        (South, East) => 4,
        (South, West) => 5,
        (West, South) => 6,
        (West, North) => 7,
        _ => unreachable!("no kick data for {:?} -> {:?}", from, to),
    }
}

/// Kick offsets to try for a rotation of `kind` from `from` to `to`
pub fn kicks(kind: PieceKind, from: Rotation, to: Rotation) -> &'static [(i8, i8); 5] {
    debug_assert!(kind != PieceKind::O, "the O piece has no kick data");

    let table = match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    let row = &table[transition_index(from, to)];
    debug_assert_eq!(row[0], (0, 0));
    row
}

/// Convert a guideline `(x, y-up)` kick into a `(row, col)` translation
pub fn kick_to_translation((x, y): (i8, i8)) -> CellPos {
    (-y, x)
}

/// Turn four cells a quarter about `pivot`
///
/// Works in half-cell units so both whole-cell and between-cell pivots stay exact.
/// With rows growing downward a clockwise turn maps `(dr, dc)` to `(dc, -dr)`.
pub fn rotate_cells(cells: &PieceCells, pivot: HalfCell, direction: RotateDirection) -> PieceCells {
    let mut out = *cells;
    for cell in &mut out {
        let here = HalfCell::of_cell(*cell);
        let dr = here.row2 - pivot.row2;
        let dc = here.col2 - pivot.col2;
        let (nr, nc) = match direction {
            RotateDirection::Clockwise => (dc, -dr),
            RotateDirection::CounterClockwise => (-dc, dr),
        };
        let row2 = pivot.row2 + nr;
        let col2 = pivot.col2 + nc;
        debug_assert!(row2 % 2 == 0 && col2 % 2 == 0, "rotation left the cell lattice");
        *cell = ((row2 / 2) as i8, (col2 / 2) as i8);
    }
    out
}

/// Accepted rotation: everything the piece needs to store, plus which kick fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    pub cells: PieceCells,
    pub pivot: HalfCell,
    pub rotation: Rotation,
    /// Position of the accepted offset in the kick row (0 = unkicked)
    pub kick_index: usize,
    /// Accepted `(row, col)` translation
    pub translation: CellPos,
}

/// Try to rotate `piece` on `grid`, applying SRS wall kicks
///
/// Returns `None` when no kick fits; the piece is left untouched either way.
pub fn resolve(
    piece: &Tetromino,
    direction: RotateDirection,
    grid: &impl Occupancy,
) -> Option<RotationOutcome> {
    // O is symmetric under rotation, so turning it is always a no-op success
    if piece.kind() == PieceKind::O {
        return Some(RotationOutcome {
            cells: piece.cells(),
            pivot: piece.pivot(),
            rotation: piece.rotation(),
            kick_index: 0,
            translation: (0, 0),
        });
    }

    let from = piece.rotation();
    let to = from.rotate(direction);
    let rotated = rotate_cells(&piece.cells(), piece.pivot(), direction);

    for (kick_index, &kick) in kicks(piece.kind(), from, to).iter().enumerate() {
        let (dr, dc) = kick_to_translation(kick);
        let fits = rotated
            .iter()
            .all(|&(row, col)| grid.is_open(row + dr, col + dc));

        if fits {
            let mut cells = rotated;
            for cell in &mut cells {
                cell.0 += dr;
                cell.1 += dc;
            }
            return Some(RotationOutcome {
                cells,
                pivot: piece.pivot().translated(dr, dc),
                rotation: to,
                kick_index,
                translation: (dr, dc),
            });
        }
    }

    None
}
