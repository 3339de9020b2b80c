//! Game session - the single serialization point for move attempts
//!
//! Every input source funnels into [`GameSession::attempt_move`]. The session
//! owns the current [`TurnArbiter`] behind a fair mutex, so attempts are
//! evaluated one at a time in arrival order.
//!
//! Readers never take that lock:
//! - the display task follows a `watch` channel holding the latest snapshot;
//! - the network layer consumes [`SessionEvent`]s from an unbounded channel.
//!
//! # Game lifecycle
//!
//! 1. No game exists until the first attempt arrives; one is created lazily.
//! 2. A finishing move freezes the board and schedules a cleanup task.
//! 3. For `cleanup_delay` the finished game rejects every attempt (`GameOver`).
//! 4. Cleanup clears the board, publishes an empty snapshot and drops the game,
//!    so the next attempt starts a fresh one.
//!
//! The cleanup task only holds a weak reference and is aborted when the session
//! is dropped or shut down.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::arbiter::{MoveOutcome, TurnArbiter};
use crate::config::InputChannels;
use crate::core::{GameSnapshot, MoveError};
use crate::types::{MoveAttempt, SourceId, CLEANUP_DELAY_MS};

/// State change published after the session lock is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A move was accepted and the game continues
    MoveAccepted {
        snapshot: GameSnapshot,
        source: SourceId,
    },
    /// A move ended the game; the board is frozen until cleanup
    GameEnded { snapshot: GameSnapshot },
    /// The finished game was cleared; the next attempt starts a new one
    GameCleared { snapshot: GameSnapshot },
    /// A seat moved from one source to another
    SeatsRebound { snapshot: GameSnapshot },
}

impl SessionEvent {
    pub fn snapshot(&self) -> &GameSnapshot {
        match self {
            SessionEvent::MoveAccepted { snapshot, .. }
            | SessionEvent::GameEnded { snapshot }
            | SessionEvent::GameCleared { snapshot }
            | SessionEvent::SeatsRebound { snapshot } => snapshot,
        }
    }
}

#[derive(Default)]
struct SessionState {
    game: Option<TurnArbiter>,
    cleanup: Option<JoinHandle<()>>,
}

/// Shared handle over the current game.
pub struct GameSession {
    channels: InputChannels,
    cleanup_delay: Duration,
    state: Mutex<SessionState>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl GameSession {
    /// Create a session with the standard cleanup delay
    pub fn new(channels: InputChannels) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        Self::with_cleanup_delay(channels, Duration::from_millis(CLEANUP_DELAY_MS))
    }

    pub fn with_cleanup_delay(
        channels: InputChannels,
        cleanup_delay: Duration,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (snapshot_tx, _) = watch::channel(GameSnapshot::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = Arc::new(Self {
            channels,
            cleanup_delay,
            state: Mutex::new(SessionState::default()),
            snapshot_tx,
            events_tx,
        });
        (session, events_rx)
    }

    pub fn channels(&self) -> InputChannels {
        self.channels
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Follow snapshot updates without touching the session lock
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Evaluate one move attempt
    ///
    /// Attempts are serialized and evaluated first-come-first-served. Must be
    /// called from within a tokio runtime (a finishing move spawns the cleanup).
    pub async fn attempt_move(
        self: &Arc<Self>,
        attempt: MoveAttempt,
    ) -> Result<MoveOutcome, MoveError> {
        let mut state = self.state.lock().await;
        let channels = self.channels;
        let game = state.game.get_or_insert_with(|| {
            debug!("starting new game");
            TurnArbiter::new(channels)
        });

        let outcome = game.attempt_move(attempt.column, attempt.source)?;
        let snapshot = game.snapshot();
        debug!("\n{}", game.state().grid());

        self.snapshot_tx.send_replace(snapshot.clone());
        let event = if outcome.finished {
            state.cleanup = Some(self.schedule_cleanup());
            SessionEvent::GameEnded { snapshot }
        } else {
            SessionEvent::MoveAccepted {
                snapshot,
                source: attempt.source,
            }
        };
        let _ = self.events_tx.send(event);

        Ok(outcome)
    }

    /// Hand the seats of `from` over to `to` in the current game
    ///
    /// Used when a network player is replaced by another connection. Returns
    /// true and publishes the new seating if a seat changed hands.
    pub async fn rebind_source(&self, from: SourceId, to: SourceId) -> bool {
        let mut state = self.state.lock().await;
        let Some(game) = state.game.as_mut() else {
            return false;
        };
        if !game.rebind_source(from, to) {
            return false;
        }

        let snapshot = game.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        let _ = self.events_tx.send(SessionEvent::SeatsRebound { snapshot });
        true
    }

    /// Whether a finished game is waiting for its cleanup
    pub async fn cleanup_pending(&self) -> bool {
        self.state.lock().await.cleanup.is_some()
    }

    /// Cancel any pending cleanup
    pub async fn shutdown(&self) {
        if let Some(handle) = self.state.lock().await.cleanup.take() {
            handle.abort();
        }
    }

    fn schedule_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let delay = self.cleanup_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(session) = weak.upgrade() {
                session.finish_game().await;
            }
        })
    }

    async fn finish_game(&self) {
        let mut state = self.state.lock().await;
        if let Some(game) = state.game.as_mut() {
            game.clear_board();
        }
        state.game = None;
        state.cleanup = None;

        let snapshot = GameSnapshot::default();
        self.snapshot_tx.send_replace(snapshot.clone());
        let _ = self.events_tx.send(SessionEvent::GameCleared { snapshot });
        info!("board cleared, ready for a new game");
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().cleanup.take() {
            handle.abort();
        }
    }
}
