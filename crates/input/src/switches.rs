//! Physical board switch poller.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::engine::{GameSession, SwitchBank};
use crate::types::{MoveAttempt, SourceId, SWITCH_POLL_MS};

/// Default interval between switch reads.
pub fn default_poll_interval() -> Duration {
    Duration::from_millis(SWITCH_POLL_MS)
}

/// Read `bank` every `poll` and submit pressed columns as hardware moves.
///
/// Rate limiting is the bank's job; wrap raw banks in
/// [`Debounced`](crate::engine::Debounced). Runs until the task is aborted.
pub async fn run_switch_poller<S: SwitchBank>(
    mut bank: S,
    session: Arc<GameSession>,
    poll: Duration,
) {
    let mut ticker = tokio::time::interval(poll);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let Some(col) = bank.poll_switch() else {
            continue;
        };
        let column = i8::try_from(col).unwrap_or(i8::MAX);
        match session
            .attempt_move(MoveAttempt::new(column, SourceId::Hardware))
            .await
        {
            Ok(outcome) => debug!(index = outcome.index, "board move accepted"),
            Err(e) if e.is_silent() => debug!(col, "board move rejected: {}", e),
            Err(e) => info!(col, "board move rejected: {}", e),
        }
    }
}
