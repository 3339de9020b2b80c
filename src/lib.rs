//! Connect Four hub (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary and the
//! integration tests can use `connect_four::{core,engine,adapter,input,term,types}`.

pub use connect_four_adapter as adapter;
pub use connect_four_core as core;
pub use connect_four_engine as engine;
pub use connect_four_input as input;
pub use connect_four_term as term;
pub use connect_four_types as types;
