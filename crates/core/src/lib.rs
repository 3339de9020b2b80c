//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the Connect Four rules and the authoritative game record.
//! It has **zero dependencies** on tasks, networking, or I/O, making it:
//!
//! - **Deterministic**: The same column sequence always produces the same game
//! - **Testable**: Every rule is exercised without a runtime
//! - **Shareable**: Snapshots are plain values that can cross task boundaries
//!
//! # Module Structure
//!
//! - [`grid`]: 7x6 flat cell array with gravity-aware column helpers
//! - [`win`]: four-in-a-row detection along four axes, rejecting wrapped lines
//! - [`game_state`]: grid plus turn, move count, seat binding and terminal status
//! - [`snapshot`]: immutable copies handed to readers
//! - [`error`]: move rejection reasons
//!
//! # Example
//!
//! ```
//! use connect_four_core::GameState;
//! use connect_four_types::{Color, GameStatus};
//!
//! let mut game = GameState::new();
//! for col in [3, 4, 3, 4, 3, 4, 3] {
//!     let color = game.turn();
//!     game.attempt_move(col, color).unwrap();
//! }
//!
//! assert_eq!(game.status(), GameStatus::Won(Color::Red));
//! assert_eq!(game.winning_cells(), &[17, 24, 31, 38]);
//! ```

pub mod error;
pub mod game_state;
pub mod grid;
pub mod snapshot;
pub mod win;

pub use connect_four_types as types;

// Re-export commonly used types for convenience
pub use error::MoveError;
pub use game_state::GameState;
pub use grid::{column_of, row_of, Grid};
pub use snapshot::GameSnapshot;
pub use win::{check_win, is_valid_step, Axis, Win};
