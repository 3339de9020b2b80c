//! Connect Four hub (default binary).
//!
//! Wires the input sources, the display refresh task and the network server
//! around one [`GameSession`]. Channels are picked from the environment:
//!
//! - `C4_BOARD_PLAYER=0` / `C4_WEB_PLAYER=0` disable a channel; with either off,
//!   moves can be typed on stdin as 1-based column numbers
//! - `C4_HOST` / `C4_PORT` set the network bind address
//! - `C4_HEADLESS=1` skips the terminal board
//!
//! Logs go to stderr and follow `RUST_LOG` (default `info`). Redirect stderr
//! when the terminal board is on.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::io::BufReader;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use connect_four::adapter::{run_server, ServerConfig};
use connect_four::engine::config::env_flag;
use connect_four::engine::{run_display, GameSession, InputChannels};
use connect_four::input::run_keyboard;
use connect_four::term::TerminalBoard;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let channels = InputChannels::from_env();
    info!(
        board = channels.board_player,
        web = channels.web_player,
        keyboard = channels.keyboard_enabled(),
        "starting connect four"
    );
    let (session, events) = GameSession::new(channels);

    let mut server: Option<JoinHandle<Result<()>>> = None;
    if channels.web_player {
        let (ready_tx, ready_rx) = oneshot::channel();
        let handle = tokio::spawn(run_server(
            ServerConfig::from_env(),
            Arc::clone(&session),
            events,
            Some(ready_tx),
        ));
        if ready_rx.await.is_err() {
            // The server dropped the ready channel without binding.
            return match handle.await? {
                Err(e) => Err(e.context("network server failed to start")),
                Ok(()) => Err(anyhow!("network server stopped before binding")),
            };
        }
        server = Some(handle);
    } else {
        drop(events);
    }

    let keyboard = channels.keyboard_enabled().then(|| {
        info!("type a column number (1-7) and press enter to play");
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if let Err(e) = run_keyboard(BufReader::new(tokio::io::stdin()), session).await {
                warn!("keyboard input failed: {}", e);
            }
        })
    });

    let display = if env_flag("C4_HEADLESS", false) {
        None
    } else {
        let board = TerminalBoard::new()?;
        Some(tokio::spawn(run_display(board, session.subscribe())))
    };

    let result = tokio::select! {
        res = tokio::signal::ctrl_c() => {
            info!("shutting down");
            res.map_err(anyhow::Error::from)
        }
        res = server_exit(&mut server) => res,
    };

    session.shutdown().await;
    let stdin_open = keyboard.is_some();
    for task in [keyboard, display].into_iter().flatten() {
        task.abort();
        let _ = task.await;
    }
    if let Some(handle) = server {
        handle.abort();
    }

    // A pending stdin read is not cancellable and would hold the runtime open.
    if stdin_open {
        if let Err(e) = &result {
            eprintln!("Error: {:?}", e);
            std::process::exit(1);
        }
        std::process::exit(0);
    }
    result
}

/// Resolves when the server task ends; never resolves without a server.
async fn server_exit(server: &mut Option<JoinHandle<Result<()>>>) -> Result<()> {
    match server {
        Some(handle) => {
            handle.await??;
            Err(anyhow!("network server stopped"))
        }
        None => std::future::pending().await,
    }
}
