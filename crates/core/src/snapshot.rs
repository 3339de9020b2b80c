use arrayvec::ArrayVec;

use crate::types::{Cell, Color, GameStatus, SourceId, CELL_COUNT, SEAT_COUNT};

/// Read-only copy of a game, handed to the display and the broadcaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [Cell; CELL_COUNT],
    pub turn: Color,
    pub move_count: u8,
    pub status: GameStatus,
    pub seats: [Option<SourceId>; SEAT_COUNT],
    pub winning_cells: ArrayVec<usize, CELL_COUNT>,
}

impl GameSnapshot {
    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|c| c.is_none())
    }

    pub fn is_winning(&self, index: usize) -> bool {
        self.winning_cells.contains(&index)
    }

    pub fn playable(&self) -> bool {
        !self.status.is_over()
    }

    /// Whether `source` would be allowed to make the next move.
    ///
    /// Mirrors the arbiter's seat policy for the common case; the keyboard-only
    /// exception for the second seat is not visible here.
    pub fn may_move(&self, source: SourceId) -> bool {
        if !self.playable() {
            return false;
        }
        match self.move_count {
            0 => true,
            1 => self.seats[0] != Some(source),
            n => self.seats[n as usize % SEAT_COUNT] == Some(source),
        }
    }

    /// Occupied cells, top row first
    pub fn pieces(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|p| (i, p.owner)))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [None; CELL_COUNT],
            turn: Color::Red,
            move_count: 0,
            status: GameStatus::InProgress,
            seats: [None; SEAT_COUNT],
            winning_cells: ArrayVec::new(),
        }
    }
}
