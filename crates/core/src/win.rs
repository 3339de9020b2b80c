//! Win detection - four-in-a-row through the last placed piece
//!
//! Only lines through the most recent piece can have become winning, so the
//! detector walks the seven cells centred on it along each axis. Flat index
//! strides wrap around grid edges (index 6 + 1 is the first cell of the next
//! row), so every candidate is checked against the axis slope before use.

use crate::grid::{column_of, row_of, Grid};
use crate::types::{Color, CELL_COUNT, WIN_LENGTH};

/// Direction scanned for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal `-`
    Flat,
    /// Ascending diagonal `/`
    Pos,
    /// Vertical `|`
    Vert,
    /// Descending diagonal `\`
    Neg,
}

impl Axis {
    /// Scan order
    pub const ALL: [Axis; 4] = [Axis::Flat, Axis::Pos, Axis::Vert, Axis::Neg];

    /// Flat index distance between neighbours on this axis
    pub fn stride(&self) -> isize {
        match self {
            Axis::Flat => 1,
            Axis::Pos => 6,
            Axis::Vert => 7,
            Axis::Neg => 8,
        }
    }

    /// Expected rise over run, with rows counted downwards and the pair ordered
    /// right-to-left. None means vertical.
    pub fn slope(&self) -> Option<isize> {
        match self {
            Axis::Flat => Some(0),
            Axis::Pos => Some(1),
            Axis::Vert => None,
            Axis::Neg => Some(-1),
        }
    }
}

/// A detected four-in-a-row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub color: Color,
    pub axis: Axis,
    /// Run cells in scan order
    pub cells: [usize; WIN_LENGTH],
}

/// Whether `a` and `b` lie on one straight, non-wrapping line along `axis`.
pub fn is_valid_step(a: isize, b: isize, axis: Axis) -> bool {
    if a == b {
        return true;
    }
    let in_range = |i: isize| (0..CELL_COUNT as isize).contains(&i);
    if !in_range(a) || !in_range(b) {
        return false;
    }

    let (a, b) = (a as usize, b as usize);
    let (right, left) = if column_of(a) >= column_of(b) {
        (a, b)
    } else {
        (b, a)
    };

    let run = (column_of(right) - column_of(left)) as isize;
    if run == 0 {
        return axis == Axis::Vert;
    }
    let rise = row_of(left) as isize - row_of(right) as isize;

    // rise / run == slope, compared exactly.
    match axis.slope() {
        Some(slope) => rise == slope * run,
        None => false,
    }
}

/// Look for four-in-a-row through `last_placed`
///
/// Returns None when the cell is empty or out of range, or when no axis holds
/// four consecutive pieces of its owner.
pub fn check_win(grid: &Grid, last_placed: usize) -> Option<Win> {
    let player = grid.owner_at(last_placed)?;
    let origin = last_placed as isize;

    for axis in Axis::ALL {
        let mut run = [0usize; WIN_LENGTH];
        let mut count = 0usize;

        for mult in -3..=3isize {
            let candidate = origin + mult * axis.stride();
            let same_owner = is_valid_step(origin, candidate, axis)
                && grid.owner_at(candidate as usize) == Some(player);

            if !same_owner {
                count = 0;
                continue;
            }

            run[count] = candidate as usize;
            count += 1;
            if count == WIN_LENGTH {
                return Some(Win {
                    color: player,
                    axis,
                    cells: run,
                });
            }
        }
    }

    None
}
