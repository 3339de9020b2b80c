//! Grid module - the 7x6 playing field
//!
//! The grid is a flat, row-major array of 42 cells. Row 0 is the top row, so
//! pieces fall towards higher indices. Gravity is enforced by the game state,
//! which only ever fills the bottom-most empty cell of a column.
//!
//! Coordinates: `row = index / COLS`, `col = index % COLS`.

use std::fmt;

use crate::error::MoveError;
use crate::types::{Cell, Color, Piece, CELL_COUNT, COLS, ROWS};

/// Row of a flat index (0 = top)
#[inline(always)]
pub fn row_of(index: usize) -> usize {
    index / COLS
}

/// Column of a flat index (0 = left)
#[inline(always)]
pub fn column_of(index: usize) -> usize {
    index % COLS
}

/// The playing field - 7 columns x 6 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// Get the cell at a flat index
    pub fn cell_at(&self, index: usize) -> Result<Cell, MoveError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(MoveError::OutOfRange { index })
    }

    /// Set the cell at a flat index
    ///
    /// Bypasses gravity; intended for building fixtures. Returns false if out of bounds.
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Flat indices of a column, top to bottom
    pub fn column_indices(&self, col: usize) -> Result<[usize; ROWS], MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange { index: col });
        }
        Ok(std::array::from_fn(|row| row * COLS + col))
    }

    /// Bottom-most empty cell of a column
    ///
    /// Returns None when the column is full or does not exist.
    pub fn first_empty_in_column(&self, col: usize) -> Option<usize> {
        let indices = self.column_indices(col).ok()?;
        indices
            .iter()
            .rev()
            .copied()
            .find(|&index| self.cells[index].is_none())
    }

    /// Whether no piece can be dropped in the column (also true for columns off the grid)
    pub fn is_column_full(&self, col: usize) -> bool {
        self.first_empty_in_column(col).is_none()
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of pieces of the given color
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(p) if p.owner == color))
            .count()
    }

    /// Owner of the piece at `index`, if any
    pub fn owner_at(&self, index: usize) -> Option<Color> {
        self.cells.get(index).copied().flatten().map(|p| p.owner)
    }

    /// Drop a piece into a column
    ///
    /// Returns the index it landed on, or None if the column cannot take it.
    pub(crate) fn drop_piece(&mut self, col: usize, color: Color) -> Option<usize> {
        let index = self.first_empty_in_column(col)?;
        self.cells[index] = Some(Piece::new(color));
        Some(index)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII rendering, one row per line with a 1-based column header.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for col in 0..COLS {
            write!(f, "|{}", col + 1)?;
        }
        writeln!(f, "|")?;
        for row in 0..ROWS {
            for col in 0..COLS {
                let ch = self.cells[row * COLS + col].map_or(' ', |p| p.letter());
                write!(f, "|{}", ch)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
