//! Engine module - arbitration between concurrent input sources
//!
//! Sits between the pure game rules in `core` and the outside world. Several
//! input sources (the physical board, a keyboard listener, network clients)
//! submit [`MoveAttempt`](crate::types::MoveAttempt)s concurrently; the engine
//! turns them into one authoritative, turn-ordered game.
//!
//! # Module Structure
//!
//! - [`arbiter`]: seat binding and turn-order policy over one game
//! - [`session`]: the serialized entry point, snapshot publication and deferred cleanup
//! - [`hardware`]: traits for the LED matrix and switch bank, plus switch debounce
//! - [`display`]: the refresh task that multiplexes snapshots onto the LED matrix
//! - [`config`]: which input channels are enabled

pub mod arbiter;
pub mod config;
pub mod display;
pub mod hardware;
pub mod session;

pub use connect_four_core as core;
pub use connect_four_types as types;

pub use arbiter::{ArbiterPhase, MoveOutcome, TurnArbiter};
pub use config::InputChannels;
pub use display::{render_frame, run_display};
pub use hardware::{BoardDisplay, Debounced, SwitchBank, SwitchDebounce};
pub use session::{GameSession, SessionEvent};
