//! Game state module - the authoritative record of one game
//!
//! Owns the grid, whose turn it is, the move count, which source holds each
//! seat, and the terminal status. Turn and source legality are decided by the
//! caller (the engine's arbiter); this module only enforces board rules.

use arrayvec::ArrayVec;

use crate::error::MoveError;
use crate::grid::Grid;
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::win::check_win;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    turn: Color,
    move_count: u8,
    seats: [Option<SourceId>; SEAT_COUNT],
    winning_cells: ArrayVec<usize, CELL_COUNT>,
    status: GameStatus,
}

impl GameState {
    /// Create a fresh game with Red to move
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            turn: Color::Red,
            move_count: 0,
            seats: [None; SEAT_COUNT],
            winning_cells: ArrayVec::new(),
            status: GameStatus::InProgress,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Color of the next piece
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winning_cells(&self) -> &[usize] {
        &self.winning_cells
    }

    /// Source bound to a seat (0 = first mover)
    pub fn seat(&self, seat: usize) -> Option<SourceId> {
        self.seats.get(seat).copied().flatten()
    }

    /// Bind a source to a seat
    pub fn bind_seat(&mut self, seat: usize, source: SourceId) {
        if let Some(slot) = self.seats.get_mut(seat) {
            *slot = Some(source);
        }
    }

    /// Source bound to the seat whose turn it is
    pub fn seat_for_turn(&self) -> Option<SourceId> {
        self.seat(self.move_count as usize % SEAT_COUNT)
    }

    /// Drop a `color` piece into `column`
    ///
    /// Returns the index the piece landed on. On success exactly one cell goes
    /// from empty to occupied and the move count grows by one; on error nothing
    /// changes.
    pub fn attempt_move(&mut self, column: i8, color: Color) -> Result<usize, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        let index = usize::try_from(column)
            .ok()
            .and_then(|col| self.grid.drop_piece(col, color))
            .ok_or(MoveError::ColumnFull { column })?;
        self.move_count += 1;

        if let Some(win) = check_win(&self.grid, index) {
            self.status = GameStatus::Won(win.color);
            self.winning_cells.clear();
            self.winning_cells.extend(win.cells);
        } else if self.move_count as usize == CELL_COUNT {
            self.status = GameStatus::Draw;
            self.winning_cells.clear();
            self.winning_cells.extend(0..CELL_COUNT);
        } else {
            self.turn = self.turn.opponent();
        }

        debug_assert_eq!(
            self.move_count as usize,
            self.grid.count(Color::Red) + self.grid.count(Color::Blue)
        );
        Ok(index)
    }

    /// Empty the grid once the end-of-game display has run its course
    ///
    /// The status stays terminal, so the instance still rejects moves.
    pub fn clear_board(&mut self) {
        self.grid.clear();
        self.winning_cells.clear();
    }

    /// Immutable copy for readers outside the arbitration path
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: *self.grid.cells(),
            turn: self.turn,
            move_count: self.move_count,
            status: self.status,
            seats: self.seats,
            winning_cells: self.winning_cells.clone(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let gs = GameState::new();
        assert_eq!(gs.turn(), Color::Red);
        assert_eq!(gs.move_count(), 0);
        assert_eq!(gs.status(), GameStatus::InProgress);
        assert!(gs.winning_cells().is_empty());
        assert_eq!(gs.seat(0), None);
        assert_eq!(gs.seat(1), None);
    }

    #[test]
    fn test_move_alternates_turn() {
        let mut gs = GameState::new();
        assert_eq!(gs.attempt_move(3, Color::Red), Ok(38));
        assert_eq!(gs.turn(), Color::Blue);
        assert_eq!(gs.attempt_move(3, Color::Blue), Ok(31));
        assert_eq!(gs.turn(), Color::Red);
        assert_eq!(gs.move_count(), 2);
    }

    #[test]
    fn test_invalid_columns() {
        let mut gs = GameState::new();
        assert_eq!(
            gs.attempt_move(-1, Color::Red),
            Err(MoveError::ColumnFull { column: -1 })
        );
        assert_eq!(
            gs.attempt_move(7, Color::Red),
            Err(MoveError::ColumnFull { column: 7 })
        );
        assert_eq!(gs.move_count(), 0);
        assert_eq!(gs.turn(), Color::Red);
    }

    #[test]
    fn test_seat_for_turn_follows_move_count() {
        let mut gs = GameState::new();
        gs.bind_seat(0, SourceId::Hardware);
        gs.bind_seat(1, SourceId::Network(7));
        assert_eq!(gs.seat_for_turn(), Some(SourceId::Hardware));
        gs.attempt_move(0, Color::Red).unwrap();
        assert_eq!(gs.seat_for_turn(), Some(SourceId::Network(7)));
    }

    #[test]
    fn test_clear_board_keeps_status() {
        let mut gs = GameState::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            let turn = gs.turn();
            gs.attempt_move(col, turn).unwrap();
        }
        assert_eq!(gs.status(), GameStatus::Won(Color::Red));
        gs.clear_board();
        assert!(gs.grid().cells().iter().all(|c| c.is_none()));
        assert!(gs.winning_cells().is_empty());
        assert_eq!(gs.attempt_move(2, Color::Blue), Err(MoveError::GameOver));
    }
}
