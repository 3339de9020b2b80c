//! Session broadcaster - fans game state out to the primary client and observers
//!
//! The first connection becomes the *primary*: its `new_move` messages are the
//! only network moves forwarded to the session. Later connections observe, in
//! arrival order. When the primary leaves, the oldest observer takes over.
//!
//! A network seat belongs to the connection that played it. Whenever a new
//! primary replaces one that left, the broadcaster records a [`Handover`] so
//! the caller can move the old connection's seats to the new one.
//!
//! Sending goes through [`Transport`], which must not block; a failed send is
//! dropped and never affects other recipients.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::core::GameSnapshot;
use crate::protocol::{BoardWire, StateMessage};
use crate::types::{ConnectionId, SourceId};

/// Outbound half of the transport collaborator.
pub trait Transport {
    /// Queue `msg` for `conn`. Returns false if the connection is gone.
    fn send(&self, conn: ConnectionId, msg: StateMessage) -> bool;
}

/// Role assigned on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Observer,
}

/// Primary change that should carry the old primary's seats along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handover {
    pub from: ConnectionId,
    pub to: ConnectionId,
}

#[derive(Debug, Default)]
pub struct SessionBroadcaster {
    primary: Option<ConnectionId>,
    observers: VecDeque<ConnectionId>,
    last: Option<GameSnapshot>,
    /// Primary that left with nobody to take over
    vacated: Option<ConnectionId>,
    handover: Option<Handover>,
}

impl SessionBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<ConnectionId> {
        self.primary
    }

    pub fn observers(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.observers.iter().copied()
    }

    pub fn is_primary(&self, conn: ConnectionId) -> bool {
        self.primary == Some(conn)
    }

    /// Register a connection and send it `current`
    pub fn on_connect<T: Transport + ?Sized>(
        &mut self,
        conn: ConnectionId,
        current: &GameSnapshot,
        transport: &T,
    ) -> Role {
        if self.primary.is_none() {
            self.primary = Some(conn);
            self.handover = self.vacated.take().map(|from| Handover { from, to: conn });
            info!(conn, "player connected");
            transport.send(conn, primary_message(Some(current), conn));
            Role::Primary
        } else {
            self.observers.push_back(conn);
            info!(conn, "observer connected");
            transport.send(conn, observer_message(Some(current)));
            Role::Observer
        }
    }

    /// Forget a connection, promoting the oldest observer if it was the primary
    pub fn on_disconnect<T: Transport + ?Sized>(&mut self, conn: ConnectionId, transport: &T) {
        if self.primary == Some(conn) {
            self.primary = self.observers.pop_front();
            match self.primary {
                Some(next) => {
                    info!(conn, next, "player left, observer promoted");
                    self.handover = Some(Handover {
                        from: conn,
                        to: next,
                    });
                }
                None => {
                    info!(conn, "player left");
                    self.vacated = Some(conn);
                }
            }
        } else {
            self.observers.retain(|&o| o != conn);
            debug!(conn, "observer left");
        }
        self.send_all(transport);
    }

    /// Take the pending seat handover, if the primary just changed
    pub fn take_handover(&mut self) -> Option<Handover> {
        self.handover.take()
    }

    /// Push a new state to everyone
    pub fn notify<T: Transport + ?Sized>(&mut self, snapshot: &GameSnapshot, transport: &T) {
        self.last = Some(snapshot.clone());
        self.send_all(transport);
    }

    fn send_all<T: Transport + ?Sized>(&self, transport: &T) {
        let Some(primary) = self.primary else {
            return;
        };
        let last = self.last.as_ref();
        if !transport.send(primary, primary_message(last, primary)) {
            debug!(conn = primary, "send to player dropped");
        }
        let msg = observer_message(last);
        for &o in &self.observers {
            if !transport.send(o, msg) {
                debug!(conn = o, "send to observer dropped");
            }
        }
    }
}

fn primary_message(snapshot: Option<&GameSnapshot>, conn: ConnectionId) -> StateMessage {
    StateMessage {
        board: snapshot.map(|s| BoardWire(s.board)),
        your_turn: snapshot.map_or(true, |s| s.may_move(SourceId::Network(conn))),
        observing: false,
    }
}

fn observer_message(snapshot: Option<&GameSnapshot>) -> StateMessage {
    StateMessage {
        board: snapshot.map(|s| BoardWire(s.board)),
        your_turn: false,
        observing: true,
    }
}
