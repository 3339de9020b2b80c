//! Turn arbiter - decides which source may move and binds sources to seats
//!
//! # Seat binding
//!
//! ```text
//! AwaitingFirstMove --any source--> AwaitingSecondMove --other source--> InPlay --win/draw--> Finished
//! ```
//!
//! - The first source to land a legal move owns seat 0 (Red).
//! - The second seat goes to any *other* source. The same source may take it
//!   only in keyboard-only mode (board and web channels both disabled).
//! - From then on only the seat whose turn it is may move.
//! - `Finished` is terminal; a new arbiter is needed for the next game.
//!
//! Seats are bound only after the board accepted the move, so probing a full
//! column never claims a seat.

use tracing::{debug, info};

use crate::config::InputChannels;
use crate::core::{GameSnapshot, GameState, MoveError};
use crate::types::{Color, GameStatus, SourceId, SEAT_COUNT};

/// Arbiter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterPhase {
    AwaitingFirstMove,
    AwaitingSecondMove,
    InPlay,
    Finished,
}

/// Result of an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub index: usize,
    pub color: Color,
    pub source: SourceId,
    pub status: GameStatus,
    /// True when this move ended the game
    pub finished: bool,
}

/// Owns one game and enforces turn order across sources.
#[derive(Debug, Clone)]
pub struct TurnArbiter {
    state: GameState,
    phase: ArbiterPhase,
    channels: InputChannels,
}

impl TurnArbiter {
    pub fn new(channels: InputChannels) -> Self {
        Self {
            state: GameState::new(),
            phase: ArbiterPhase::AwaitingFirstMove,
            channels,
        }
    }

    pub fn phase(&self) -> ArbiterPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Evaluate a move attempt from `source`
    ///
    /// Rejections never change the game.
    pub fn attempt_move(&mut self, column: i8, source: SourceId) -> Result<MoveOutcome, MoveError> {
        match self.phase {
            ArbiterPhase::Finished => return Err(MoveError::GameOver),
            ArbiterPhase::AwaitingFirstMove => {}
            ArbiterPhase::AwaitingSecondMove => {
                if self.state.seat(0) == Some(source) && !self.channels.allows_shared_seat() {
                    return Err(MoveError::WrongSource);
                }
            }
            ArbiterPhase::InPlay => {
                if self.state.seat_for_turn() != Some(source) {
                    return Err(MoveError::WrongTurn);
                }
            }
        }

        let color = self.state.turn();
        let index = self.state.attempt_move(column, color)?;
        info!(%source, ?color, column, index, "placed piece");

        match self.phase {
            ArbiterPhase::AwaitingFirstMove => {
                self.state.bind_seat(0, source);
                self.phase = ArbiterPhase::AwaitingSecondMove;
                debug!(%source, "bound first seat");
            }
            ArbiterPhase::AwaitingSecondMove => {
                self.state.bind_seat(1, source);
                self.phase = ArbiterPhase::InPlay;
                debug!(%source, "bound second seat");
            }
            _ => {}
        }

        let status = self.state.status();
        let finished = status.is_over();
        if finished {
            self.phase = ArbiterPhase::Finished;
            match status {
                GameStatus::Won(winner) => info!(?winner, cells = ?self.state.winning_cells(), "game won"),
                _ => info!("game is a draw"),
            }
        }

        Ok(MoveOutcome {
            index,
            color,
            source,
            status,
            finished,
        })
    }

    /// Hand every seat held by `from` over to `to`
    ///
    /// Returns true if a seat changed hands.
    pub fn rebind_source(&mut self, from: SourceId, to: SourceId) -> bool {
        let mut changed = false;
        for seat in 0..SEAT_COUNT {
            if self.state.seat(seat) == Some(from) {
                self.state.bind_seat(seat, to);
                changed = true;
            }
        }
        if changed {
            info!(%from, %to, "seat handed over");
        }
        changed
    }

    /// Clear the frozen end-of-game board
    pub fn clear_board(&mut self) {
        self.state.clear_board();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SourceId = SourceId::Hardware;
    const B: SourceId = SourceId::Network(1);

    #[test]
    fn test_first_move_binds_seat_zero() {
        let mut arb = TurnArbiter::new(InputChannels::default());
        let out = arb.attempt_move(3, B).unwrap();
        assert_eq!(out.color, Color::Red);
        assert_eq!(arb.state().seat(0), Some(B));
        assert_eq!(arb.phase(), ArbiterPhase::AwaitingSecondMove);
    }

    #[test]
    fn test_invalid_column_does_not_bind() {
        let mut arb = TurnArbiter::new(InputChannels::default());
        assert_eq!(
            arb.attempt_move(9, A),
            Err(MoveError::ColumnFull { column: 9 })
        );
        assert_eq!(arb.state().seat(0), None);
        assert_eq!(arb.phase(), ArbiterPhase::AwaitingFirstMove);
    }

    #[test]
    fn test_same_source_cannot_take_second_seat() {
        let mut arb = TurnArbiter::new(InputChannels::default());
        arb.attempt_move(0, A).unwrap();
        assert_eq!(arb.attempt_move(1, A), Err(MoveError::WrongSource));
        assert_eq!(arb.state().move_count(), 1);
        arb.attempt_move(1, B).unwrap();
        assert_eq!(arb.phase(), ArbiterPhase::InPlay);
    }

    #[test]
    fn test_keyboard_only_allows_shared_seat() {
        let mut arb = TurnArbiter::new(InputChannels::default().keyboard_only());
        arb.attempt_move(0, SourceId::Interactive).unwrap();
        arb.attempt_move(1, SourceId::Interactive).unwrap();
        assert_eq!(arb.state().seat(1), Some(SourceId::Interactive));
        arb.attempt_move(2, SourceId::Interactive).unwrap();
        assert_eq!(arb.state().move_count(), 3);
    }

    #[test]
    fn test_single_disabled_channel_still_requires_distinct_sources() {
        let channels = InputChannels {
            board_player: true,
            web_player: false,
        };
        let mut arb = TurnArbiter::new(channels);
        arb.attempt_move(0, SourceId::Interactive).unwrap();
        assert_eq!(
            arb.attempt_move(1, SourceId::Interactive),
            Err(MoveError::WrongSource)
        );
    }

    #[test]
    fn test_wrong_turn_in_play() {
        let mut arb = TurnArbiter::new(InputChannels::default());
        arb.attempt_move(0, A).unwrap();
        arb.attempt_move(1, B).unwrap();
        assert_eq!(arb.attempt_move(2, B), Err(MoveError::WrongTurn));
        assert_eq!(
            arb.attempt_move(2, SourceId::Interactive),
            Err(MoveError::WrongTurn)
        );
        assert_eq!(arb.state().move_count(), 2);
        arb.attempt_move(2, A).unwrap();
    }

    #[test]
    fn test_rebind_hands_seat_to_new_source() {
        let mut arb = TurnArbiter::new(InputChannels::default());
        arb.attempt_move(0, B).unwrap();
        arb.attempt_move(1, A).unwrap();

        let c = SourceId::Network(2);
        assert!(arb.rebind_source(B, c));
        assert_eq!(arb.state().seat(0), Some(c));
        assert_eq!(arb.state().seat(1), Some(A));
        assert_eq!(arb.attempt_move(2, B), Err(MoveError::WrongTurn));
        arb.attempt_move(2, c).unwrap();
        assert_eq!(arb.state().move_count(), 3);

        assert!(!arb.rebind_source(B, c));
    }
}
