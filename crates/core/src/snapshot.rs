//! Snapshot module - immutable copies of game state for renderers
//!
//! Everything here is plain data taken under whatever lock guards the playfield, so a
//! reader never sees a half-applied lock or line clear. All types serialize with serde.

use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::pieces::PieceCells;
use crate::types::{Cell, GameMode, Phase, PieceKind, Rotation, CLEAR_MARKER, EMPTY_CELL};

/// Immutable copy of the grid as a renderer should draw it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cell values (see `blockfall_types` for the encoding)
    pub cells: Vec<Cell>,
}

impl GridSnapshot {
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height as usize || col >= self.width as usize {
            return None;
        }
        Some(self.cells[row * self.width as usize + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows()
            .nth(row)
            .is_some_and(|cells| cells.iter().all(|&c| PieceKind::from_id(c).is_some()))
    }

    /// Number of non-empty cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                let ch = match cell {
                    EMPTY_CELL => '.',
                    CLEAR_MARKER => '=',
                    id => PieceKind::from_id(id)
                        .map(|k| k.as_str().as_bytes()[0].to_ascii_uppercase() as char)
                        .unwrap_or('?'),
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub cells: PieceCells,
}

/// Everything a presentation layer polls once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub grid: GridSnapshot,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<PieceCells>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub level_progress: u32,
    pub lines: u32,
    pub drop_interval_ms: u64,
    pub phase: Phase,
    pub mode: GameMode,
    pub pieces_locked: u32,
    pub episode: u32,
}

/// Emitted when a lock clears at least one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearEvent {
    /// Cleared row indices, ascending, as they were before the sweep
    ///
    /// Lists at most four rows; `lines` is the full count.
    pub rows: ArrayVec<usize, 4>,
    pub lines: u32,
    pub points: u32,
    pub level_up: bool,
}
