//! Adapter module - network players and observers over TCP with a JSON protocol
//!
//! This module lets remote clients play and watch the game. It is the
//! transport collaborator of the engine: it feeds the primary client's moves
//! into the [`GameSession`](crate::engine::GameSession) and pushes every state
//! change back out.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 0.0.0.0:3000)
//! 2. **Role Assignment**: First connected client becomes the player (primary);
//!    later clients observe
//! 3. **State Streaming**: Every client immediately receives the current board,
//!    then a fresh state after every accepted move, game end, and board clear
//! 4. **Moves**: The primary sends `new_move` messages; moves from observers are ignored
//! 5. **Promotion**: When the primary disconnects, the oldest observer takes over
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **new_move**: `{"type":"new_move","column":3}` (column 0-6, number or numeric string)
//!
//! ## Server → Client
//!
//! - **state**: `{"board":[...42 cells...],"your_turn":true,"observing":false}`
//!
//! # Environment Variables
//!
//! - `C4_HOST`: Bind address (default: "0.0.0.0")
//! - `C4_PORT`: Port number (default: 3000)
//!
//! # Implementation
//!
//! - Uses **tokio** for async networking
//! - See [`protocol`] for message structure definitions
//! - See [`broadcaster`] for primary/observer bookkeeping
//! - See [`server`] for TCP server implementation
//!
//! # Testing
//!
//! Connect to the adapter using netcat for manual testing:
//!
//! ```bash
//! nc 127.0.0.1 3000
//! {"type":"new_move","column":3}
//! ```

pub mod broadcaster;
pub mod protocol;
pub mod server;

pub use connect_four_core as core;
pub use connect_four_engine as engine;
pub use connect_four_types as types;

// Re-export protocol types for convenience
pub use broadcaster::{Handover, Role, SessionBroadcaster, Transport};
pub use protocol::*;
pub use server::*;
