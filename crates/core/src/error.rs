//! Move rejection reasons.

use thiserror::Error;

/// Why a move attempt was rejected.
///
/// Every rejection leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Index outside the grid. Indicates a caller bug.
    #[error("index {index} is outside the grid")]
    OutOfRange { index: usize },

    /// Column is full or does not exist. The same player should be re-prompted.
    #[error("column {column} is full")]
    ColumnFull { column: i8 },

    /// The first mover tried to also claim the second seat.
    #[error("source already holds the first seat")]
    WrongSource,

    /// The source is not bound to the seat whose turn it is.
    #[error("not this source's turn")]
    WrongTurn,

    /// The game already ended; a fresh game is required.
    #[error("game is over")]
    GameOver,
}

impl MoveError {
    /// Rejections that should be dropped without user-facing feedback.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            MoveError::WrongSource | MoveError::WrongTurn | MoveError::GameOver
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MoveError::ColumnFull { column: 3 }.to_string(),
            "column 3 is full"
        );
        assert_eq!(
            MoveError::OutOfRange { index: 42 }.to_string(),
            "index 42 is outside the grid"
        );
    }

    #[test]
    fn test_silent_rejections() {
        assert!(MoveError::WrongTurn.is_silent());
        assert!(MoveError::WrongSource.is_silent());
        assert!(MoveError::GameOver.is_silent());
        assert!(!MoveError::ColumnFull { column: 0 }.is_silent());
    }
}
