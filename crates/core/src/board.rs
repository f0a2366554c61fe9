//! Board module - manages the settled grid
//!
//! The board is a rectangular grid (10x20 by default) of `u8` cells using flat row-major
//! storage. It holds settled blocks only; the falling piece lives on the playfield and
//! is merged in when it locks.
//! Coordinates: `(row, col)` where row 0 is the top and col 0 the left edge.

use arrayvec::ArrayVec;

use crate::srs::Occupancy;
use crate::types::{
    Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, CLEAR_MARKER, EMPTY_CELL, MAX_GRID_SIDE,
    MIN_GRID_SIDE,
};

/// The settled grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the default 10x20 size
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board; dimensions are fixed for its lifetime
    ///
    /// Each side is clamped to [`MIN_GRID_SIDE`]..=[`MAX_GRID_SIDE`] so `(row, col)`
    /// arithmetic on `i8` never overflows.
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = width.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        let height = height.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i8, col: i8) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, row: i8, col: i8) -> bool {
        row >= 0 && col >= 0 && (row as u8) < self.height && (col as u8) < self.width
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if cell != EMPTY_CELL)
    }

    fn row(&self, row: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[row * width..(row + 1) * width]
    }

    /// Check if every column of a row holds a settled block
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        self.row(row)
            .iter()
            .all(|&cell| PieceKind::from_id(cell).is_some())
    }

    /// Merge a locked piece into the grid
    /// Returns false (and writes nothing) if any cell is out of bounds or occupied
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(row, col)| self.is_open(row, col)) {
            return false;
        }

        for &(row, col) in cells {
            self.set(row, col, kind.id());
        }

        true
    }

    /// Overwrite every full row with [`CLEAR_MARKER`]
    /// Returns the number of rows marked
    pub fn mark_full_rows(&mut self) -> u32 {
        let width = self.width as usize;
        let mut marked = 0;
        for row in 0..self.height as usize {
            if self.is_row_full(row) {
                self.cells[row * width..(row + 1) * width].fill(CLEAR_MARKER);
                marked += 1;
            }
        }
        marked
    }

    fn is_row_marked(&self, row: usize) -> bool {
        self.row(row).iter().all(|&cell| cell == CLEAR_MARKER)
    }

    /// Remove marked rows, shifting everything above them down
    ///
    /// Two-pointer compaction from the bottom up: each surviving row drops by the number
    /// of removed rows beneath it, and the vacated rows at the top are emptied.
    /// Returns the removed row indices in ascending order. Play can fill at most four
    /// rows at once; on a hand-built board with more, only the lowest four are listed.
    pub fn sweep_marked_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut removed = ArrayVec::new();
        let width = self.width as usize;
        let mut write_row = self.height as usize;

        for read_row in (0..self.height as usize).rev() {
            if self.is_row_marked(read_row) {
                // Full past four: still swept, just not listed
                let _ = removed.try_push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(EMPTY_CELL);

        removed.reverse();
        removed
    }

    /// Mark and sweep all full rows in one step
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        if self.mark_full_rows() == 0 {
            return ArrayVec::new();
        }
        self.sweep_marked_rows()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Occupancy for Board {
    /// Check if position is valid (within bounds and empty)
    fn is_open(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(EMPTY_CELL))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
