//! Display refresh - multiplexes the latest snapshot onto the LED matrix
//!
//! The refresh loop never touches the session lock: it follows the snapshot
//! `watch` channel and redraws every `DISPLAY_REFRESH_MS`. Only occupied
//! squares are addressed. Winning cells are skipped during the second half of
//! each flash period, which makes them blink while the finished board is frozen.
//!
//! The physical board is mounted mirrored, so grid column `c` is wired to
//! hardware column `COLS - 1 - c`.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::core::{column_of, row_of, GameSnapshot};
use crate::hardware::BoardDisplay;
use crate::types::{COLS, DISPLAY_REFRESH_MS, FLASH_PERIOD_MS};

/// Whether winning cells are hidden at `elapsed_ms`
pub fn flash_hidden(elapsed_ms: u64) -> bool {
    elapsed_ms % FLASH_PERIOD_MS >= FLASH_PERIOD_MS / 2
}

/// Hardware column wired to a grid column
pub fn hardware_column(col: usize) -> usize {
    COLS - 1 - col
}

/// Draw one multiplexing pass of `snap`
pub fn render_frame<D: BoardDisplay + ?Sized>(snap: &GameSnapshot, hide_winning: bool, display: &mut D) {
    if snap.is_empty() {
        display.clear();
    } else {
        for (index, color) in snap.pieces() {
            if hide_winning && snap.is_winning(index) {
                continue;
            }
            display.set_square(row_of(index), hardware_column(column_of(index)), Some(color));
        }
    }
    display.present();
}

/// Refresh `display` until the snapshot channel closes
pub async fn run_display<D: BoardDisplay>(display: D, snapshots: watch::Receiver<GameSnapshot>) {
    run_display_every(display, snapshots, Duration::from_millis(DISPLAY_REFRESH_MS)).await
}

pub async fn run_display_every<D: BoardDisplay>(
    mut display: D,
    mut snapshots: watch::Receiver<GameSnapshot>,
    refresh: Duration,
) {
    display.clear();
    debug!("display refresh started");

    let epoch = Instant::now();
    let mut snap = snapshots.borrow_and_update().clone();
    let mut ticker = tokio::time::interval(refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        match snapshots.has_changed() {
            Ok(true) => snap = snapshots.borrow_and_update().clone(),
            Ok(false) => {}
            Err(_) => break,
        }
        let elapsed_ms = epoch.elapsed().as_millis() as u64;
        render_frame(&snap, flash_hidden(elapsed_ms), &mut display);
    }

    display.clear();
    debug!("display refresh stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::Color;

    #[derive(Default)]
    struct Recorder {
        lit: Vec<(usize, usize, Option<Color>)>,
        clears: usize,
        frames: usize,
    }

    impl BoardDisplay for Recorder {
        fn set_square(&mut self, row: usize, col: usize, color: Option<Color>) -> bool {
            self.lit.push((row, col, color));
            true
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn present(&mut self) {
            self.frames += 1;
        }
    }

    #[test]
    fn test_flash_phase() {
        assert!(!flash_hidden(0));
        assert!(!flash_hidden(499));
        assert!(flash_hidden(500));
        assert!(flash_hidden(999));
        assert!(!flash_hidden(1000));
    }

    #[test]
    fn test_empty_snapshot_clears() {
        let mut rec = Recorder::default();
        render_frame(&GameSnapshot::default(), false, &mut rec);
        assert_eq!(rec.clears, 1);
        assert!(rec.lit.is_empty());
        assert_eq!(rec.frames, 1);
    }

    #[test]
    fn test_columns_are_mirrored() {
        let mut gs = GameState::new();
        gs.attempt_move(0, Color::Red).unwrap();
        let mut rec = Recorder::default();
        render_frame(&gs.snapshot(), false, &mut rec);
        assert_eq!(rec.lit, vec![(5, 6, Some(Color::Red))]);
    }

    #[test]
    fn test_winning_cells_blink() {
        let mut gs = GameState::new();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            let turn = gs.turn();
            gs.attempt_move(col, turn).unwrap();
        }
        let snap = gs.snapshot();

        let mut shown = Recorder::default();
        render_frame(&snap, false, &mut shown);
        assert_eq!(shown.lit.len(), 7);

        let mut hidden = Recorder::default();
        render_frame(&snap, true, &mut hidden);
        assert_eq!(hidden.lit.len(), 3);
        assert!(hidden.lit.iter().all(|&(_, _, c)| c == Some(Color::Blue)));
    }
}
