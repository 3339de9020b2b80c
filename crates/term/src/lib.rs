//! Terminal stand-in for the physical LED board.
//!
//! Renders into a small character [`Canvas`] that is flushed to the terminal
//! with crossterm, repainting only the spans that changed since the last frame.
//! [`TerminalBoard`] implements the engine's
//! [`BoardDisplay`](crate::engine::BoardDisplay), so the display refresh task
//! drives it exactly like the real matrix.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use connect_four_core as core;
pub use connect_four_engine as engine;
pub use connect_four_types as types;

pub use board_view::TerminalBoard;
pub use fb::{Canvas, Glyph, Rgb};
pub use renderer::{changed_spans, encode_frame, TerminalRenderer};
