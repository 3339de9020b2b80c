//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the hub.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, arbitration, display, wire protocol).
//!
//! # Board Dimensions
//!
//! Standard Connect Four grid:
//!
//! - **Columns**: 7 (indexed 0-6, left to right)
//! - **Rows**: 6 (indexed 0-5, top to bottom)
//! - **Cells**: 42, stored row-major (`row * COLS + col`)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SWITCH_DEBOUNCE_MS` | 300 | Minimum gap between two accepted switch readings |
//! | `SWITCH_POLL_MS` | 10 | Switch bank sampling interval |
//! | `DISPLAY_REFRESH_MS` | 2 | Display multiplexing pass interval |
//! | `FLASH_PERIOD_MS` | 1000 | Winning-cell blink period |
//! | `CLEANUP_DELAY_MS` | 5000 | Frozen end-of-game board before clearing |
//!
//! # Examples
//!
//! ```
//! use connect_four_types::{Color, SourceId, COLS, ROWS};
//!
//! assert_eq!(Color::Red.opponent(), Color::Blue);
//! assert_eq!(Color::from_str("BLUE"), Some(Color::Blue));
//! assert_ne!(SourceId::Network(1), SourceId::Network(2));
//! assert_eq!(ROWS * COLS, 42);
//! ```

/// Number of columns on the grid
pub const COLS: usize = 7;

/// Number of rows on the grid
pub const ROWS: usize = 6;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = ROWS * COLS;

/// Pieces in a row needed to win
pub const WIN_LENGTH: usize = 4;

/// Number of turn slots (first mover, second mover)
pub const SEAT_COUNT: usize = 2;

/// Minimum gap between two accepted switch readings (debounce)
pub const SWITCH_DEBOUNCE_MS: u64 = 300;

/// Switch bank sampling interval
pub const SWITCH_POLL_MS: u64 = 10;

/// Display refresh interval (one multiplexing pass over the grid)
pub const DISPLAY_REFRESH_MS: u64 = 2;

/// Winning cells are hidden during the second half of each period
pub const FLASH_PERIOD_MS: u64 = 1000;

/// Delay between game end and board clearing
pub const CLEANUP_DELAY_MS: u64 = 5000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions() {
        assert_eq!(COLS, 7);
        assert_eq!(ROWS, 6);
        assert_eq!(CELL_COUNT, 42);
    }

    #[test]
    fn color_opponent_is_involutive() {
        for c in [Color::Red, Color::Blue] {
            assert_ne!(c.opponent(), c);
            assert_eq!(c.opponent().opponent(), c);
        }
    }

    #[test]
    fn piece_letters() {
        assert_eq!(Piece::new(Color::Red).letter(), 'R');
        assert_eq!(Piece::new(Color::Blue).letter(), 'B');
    }

    #[test]
    fn sources_compare_by_value() {
        assert_eq!(SourceId::Network(3), SourceId::Network(3));
        assert_ne!(SourceId::Hardware, SourceId::Interactive);
        assert!(SourceId::Network(0).is_network());
        assert!(!SourceId::Hardware.is_network());
    }
}

/// The two piece colors
///
/// Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    /// The other color
    pub fn opponent(&self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use connect_four_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("Blue"), Some(Color::Blue));
    /// assert_eq!(Color::from_str("green"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            _ => None,
        }
    }

    /// Convert to lowercase string (wire format)
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
        }
    }
}

/// A placed piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Color,
}

impl Piece {
    pub fn new(owner: Color) -> Self {
        Self { owner }
    }

    /// Single-letter rendering used by the ASCII board
    pub fn letter(&self) -> char {
        match self.owner {
            Color::Red => 'R',
            Color::Blue => 'B',
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Piece)`: Cell holding a piece
pub type Cell = Option<Piece>;

/// Opaque handle of a network connection
pub type ConnectionId = usize;

/// Origin of a move attempt
///
/// Sources are compared by value: two attempts come from the same source exactly
/// when their `SourceId`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// The physical board's switch bank
    Hardware,
    /// Line-oriented local input
    Interactive,
    /// A network client
    Network(ConnectionId),
}

impl SourceId {
    pub fn is_network(&self) -> bool {
        matches!(self, SourceId::Network(_))
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceId::Hardware => write!(f, "board"),
            SourceId::Interactive => write!(f, "keyboard"),
            SourceId::Network(id) => write!(f, "client {}", id),
        }
    }
}

/// Game progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won(Color),
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// A request to drop a piece, tagged with where it came from
///
/// Columns are signed so malformed input (e.g. keyboard "0") surfaces as an
/// out-of-range column rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAttempt {
    pub column: i8,
    pub source: SourceId,
}

impl MoveAttempt {
    pub fn new(column: i8, source: SourceId) -> Self {
        Self { column, source }
    }
}
