//! TCP server for network players
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.
//!
//! Every client gets its own unbounded outbound queue drained by a dedicated
//! writer task, so broadcasting never waits on a slow socket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::broadcaster::{Handover, SessionBroadcaster, Transport};
use crate::engine::{GameSession, SessionEvent};
use crate::protocol::{parse_message, ParsedMessage, StateMessage};
use crate::types::{ConnectionId, MoveAttempt, SourceId};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables (`C4_HOST`, `C4_PORT`)
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("C4_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("C4_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }
}

/// Outbound queues of connected clients
#[derive(Default)]
struct ClientTable {
    senders: HashMap<ConnectionId, mpsc::UnboundedSender<StateMessage>>,
}

impl Transport for ClientTable {
    fn send(&self, conn: ConnectionId, msg: StateMessage) -> bool {
        self.senders
            .get(&conn)
            .map(|tx| tx.send(msg).is_ok())
            .unwrap_or(false)
    }
}

#[derive(Default)]
struct Hub {
    broadcaster: SessionBroadcaster,
    clients: ClientTable,
}

/// Shared server state
struct ServerState {
    hub: Mutex<Hub>,
    session: Arc<GameSession>,
}

impl ServerState {
    async fn is_primary(&self, conn: ConnectionId) -> bool {
        self.hub.lock().await.broadcaster.is_primary(conn)
    }
}

/// Start the TCP server
///
/// Runs until the listener fails. `ready_tx` receives the bound address once
/// the server accepts connections.
pub async fn run_server(
    config: ServerConfig,
    session: Arc<GameSession>,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState {
        hub: Mutex::new(Hub::default()),
        session,
    });

    // Session event dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match &event {
                    SessionEvent::MoveAccepted { source, .. } => {
                        debug!(%source, "broadcasting move")
                    }
                    SessionEvent::GameEnded { .. } => debug!("broadcasting final board"),
                    SessionEvent::GameCleared { .. } => debug!("broadcasting cleared board"),
                    SessionEvent::SeatsRebound { .. } => debug!("broadcasting new seating"),
                }
                let mut hub = state.hub.lock().await;
                let Hub {
                    broadcaster,
                    clients,
                } = &mut *hub;
                broadcaster.notify(event.snapshot(), clients);
            }
        });
    }

    let mut client_id_counter: ConnectionId = 0;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let conn = client_id_counter;
        debug!(conn, %addr, "connection accepted");

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, conn, state).await {
                warn!(conn, "client error: {}", e);
            }
            debug!(conn, "connection closed");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    conn: ConnectionId,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<StateMessage>();

    {
        let mut hub = state.hub.lock().await;
        let Hub {
            broadcaster,
            clients,
        } = &mut *hub;
        clients.senders.insert(conn, tx);
        broadcaster.on_connect(conn, &state.session.snapshot(), clients);
        hand_over_seats(broadcaster, &state.session).await;
    }

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &msg).is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let result = read_messages(reader, conn, &state).await;

    // Clean up even when the read side failed, so a broken primary never lingers.
    {
        let mut hub = state.hub.lock().await;
        let Hub {
            broadcaster,
            clients,
        } = &mut *hub;
        clients.senders.remove(&conn);
        broadcaster.on_disconnect(conn, clients);
        hand_over_seats(broadcaster, &state.session).await;
    }

    // The sender was dropped with the table entry; the writer drains and exits.
    let _ = write_task.await;

    result
}

/// Move the seats of a replaced primary to its successor.
///
/// Runs under the hub lock so consecutive handovers apply in order.
async fn hand_over_seats(broadcaster: &mut SessionBroadcaster, session: &GameSession) {
    let Some(Handover { from, to }) = broadcaster.take_handover() else {
        return;
    };
    if session
        .rebind_source(SourceId::Network(from), SourceId::Network(to))
        .await
    {
        debug!(from, to, "network seat handed over");
    }
}

async fn read_messages(
    reader: tokio::net::tcp::OwnedReadHalf,
    conn: ConnectionId,
    state: &ServerState,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::NewMove { column }) => {
                if !state.is_primary(conn).await {
                    debug!(conn, "ignoring move from observer");
                    continue;
                }
                let attempt = MoveAttempt::new(column, SourceId::Network(conn));
                match state.session.attempt_move(attempt).await {
                    Ok(_) => {}
                    Err(e) if e.is_silent() => debug!(conn, "move rejected: {}", e),
                    Err(e) => info!(conn, "move rejected: {}", e),
                }
            }
            Ok(ParsedMessage::InvalidMove) => debug!(conn, "new_move without a usable column"),
            Ok(ParsedMessage::Unknown(kind)) => debug!(conn, kind = %kind, "ignoring message"),
            Err(e) => debug!(conn, "JSON parse error: {}", e),
        }
    }

    Ok(())
}
