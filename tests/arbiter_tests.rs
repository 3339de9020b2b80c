//! TurnArbiter tests - seat binding and turn order across sources

use connect_four::core::MoveError;
use connect_four::engine::{ArbiterPhase, InputChannels, TurnArbiter};
use connect_four::types::{Color, GameStatus, SourceId};

const BOARD: SourceId = SourceId::Hardware;
const CLIENT: SourceId = SourceId::Network(1);
const OTHER_CLIENT: SourceId = SourceId::Network(2);

#[test]
fn test_vertical_win_through_alternating_sources() {
    let mut arbiter = TurnArbiter::new(InputChannels::default());

    arbiter.attempt_move(3, BOARD).unwrap();
    assert_eq!(arbiter.attempt_move(4, BOARD), Err(MoveError::WrongSource));

    arbiter.attempt_move(4, CLIENT).unwrap();
    assert_eq!(arbiter.attempt_move(4, CLIENT), Err(MoveError::WrongTurn));
    assert_eq!(arbiter.attempt_move(4, OTHER_CLIENT), Err(MoveError::WrongTurn));

    for (col, src) in [(3, BOARD), (4, CLIENT), (3, BOARD), (4, CLIENT)] {
        let outcome = arbiter.attempt_move(col, src).unwrap();
        assert!(!outcome.finished);
    }

    let outcome = arbiter.attempt_move(3, BOARD).unwrap();
    assert!(outcome.finished);
    assert_eq!(outcome.status, GameStatus::Won(Color::Red));
    assert_eq!(outcome.index, 17);
    assert_eq!(arbiter.phase(), ArbiterPhase::Finished);
    assert_eq!(arbiter.state().winning_cells(), &[17, 24, 31, 38]);

    assert_eq!(arbiter.attempt_move(0, CLIENT), Err(MoveError::GameOver));
    assert_eq!(arbiter.attempt_move(0, BOARD), Err(MoveError::GameOver));
}

#[test]
fn test_seats_stay_bound() {
    let mut arbiter = TurnArbiter::new(InputChannels::default());
    arbiter.attempt_move(0, CLIENT).unwrap();
    arbiter.attempt_move(1, BOARD).unwrap();

    for _ in 0..3 {
        assert_eq!(arbiter.attempt_move(2, BOARD), Err(MoveError::WrongTurn));
        arbiter.attempt_move(2, CLIENT).unwrap();
        assert_eq!(arbiter.attempt_move(5, CLIENT), Err(MoveError::WrongTurn));
        arbiter.attempt_move(5, BOARD).unwrap();
    }

    let state = arbiter.state();
    assert_eq!(state.seat(0), Some(CLIENT));
    assert_eq!(state.seat(1), Some(BOARD));
    assert_eq!(state.move_count(), 8);
}

#[test]
fn test_invalid_column_does_not_claim_a_seat() {
    let mut arbiter = TurnArbiter::new(InputChannels::default());
    assert_eq!(
        arbiter.attempt_move(9, CLIENT),
        Err(MoveError::ColumnFull { column: 9 })
    );
    assert_eq!(arbiter.phase(), ArbiterPhase::AwaitingFirstMove);
    assert_eq!(arbiter.state().seat(0), None);

    arbiter.attempt_move(0, BOARD).unwrap();
    assert_eq!(arbiter.state().seat(0), Some(BOARD));
}

#[test]
fn test_keyboard_only_mode_shares_seats() {
    let mut arbiter = TurnArbiter::new(InputChannels::default().keyboard_only());
    for col in [0, 1, 0, 1] {
        arbiter.attempt_move(col, SourceId::Interactive).unwrap();
    }
    assert_eq!(arbiter.phase(), ArbiterPhase::InPlay);
    assert_eq!(arbiter.state().seat(0), Some(SourceId::Interactive));
    assert_eq!(arbiter.state().seat(1), Some(SourceId::Interactive));
}

#[test]
fn test_one_disabled_channel_still_needs_two_sources() {
    let channels = InputChannels {
        board_player: false,
        web_player: true,
    };
    let mut arbiter = TurnArbiter::new(channels);
    arbiter.attempt_move(0, SourceId::Interactive).unwrap();
    assert_eq!(
        arbiter.attempt_move(1, SourceId::Interactive),
        Err(MoveError::WrongSource)
    );
    arbiter.attempt_move(1, CLIENT).unwrap();
    assert_eq!(arbiter.phase(), ArbiterPhase::InPlay);
}
