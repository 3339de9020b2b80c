//! Local input sources (engine-facing).
//!
//! Two producers feed [`GameSession::attempt_move`](crate::engine::GameSession::attempt_move)
//! from the machine the game runs on:
//!
//! - [`keyboard`]: one 1-based column number per line on a reader (usually stdin)
//! - [`switches`]: polls the physical board's column switches on a fixed interval
//!
//! Neither source knows about seats or turns; rejected attempts are only logged.

pub mod keyboard;
pub mod switches;

pub use connect_four_engine as engine;
pub use connect_four_types as types;

pub use keyboard::{parse_column_line, run_keyboard};
pub use switches::{default_poll_interval, run_switch_poller};
