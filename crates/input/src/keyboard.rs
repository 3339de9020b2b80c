//! Keyboard listener.
//!
//! Reads lines such as `4` and submits them as [`SourceId::Interactive`]
//! attempts. Players count columns from 1; the grid counts from 0.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::engine::GameSession;
use crate::types::{MoveAttempt, SourceId};

/// Parse one keyboard line into a 0-based column.
///
/// Any integer is accepted, so `0` or `9` become out-of-range columns that the
/// game rejects. Lines that are not integers yield `None`.
pub fn parse_column_line(line: &str) -> Option<i8> {
    let n: i64 = line.trim().parse().ok()?;
    Some(i8::try_from(n - 1).unwrap_or(i8::MIN))
}

/// Submit every parsed line as a keyboard move until the reader hits EOF.
pub async fn run_keyboard<R>(reader: R, session: Arc<GameSession>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(column) = parse_column_line(&line) else {
            if !line.trim().is_empty() {
                debug!(line = %line.trim(), "not a column number");
            }
            continue;
        };

        match session
            .attempt_move(MoveAttempt::new(column, SourceId::Interactive))
            .await
        {
            Ok(outcome) => debug!(index = outcome.index, "keyboard move accepted"),
            Err(e) if e.is_silent() => debug!("keyboard move rejected: {}", e),
            Err(e) => info!("keyboard move rejected: {}", e),
        }
    }
    debug!("keyboard input closed");
    Ok(())
}
