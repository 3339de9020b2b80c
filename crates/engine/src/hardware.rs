//! Physical board collaborators.
//!
//! The engine drives the LED matrix and reads the column switches through these
//! two traits. Pin assignment and multiplexing live in the implementations.

use tokio::time::Instant;

use crate::types::{Color, COLS, ROWS, SWITCH_DEBOUNCE_MS};

/// LED matrix of the physical board.
pub trait BoardDisplay {
    /// Light one square, or switch it off with `None`.
    ///
    /// Returns false when the coordinates are off the board.
    fn set_square(&mut self, row: usize, col: usize, color: Option<Color>) -> bool;

    /// Switch every square off.
    fn clear(&mut self);

    /// Called once after every refresh pass.
    fn present(&mut self) {}
}

/// Column switches of the physical board.
pub trait SwitchBank {
    /// Column whose switch is currently pressed, if any.
    fn poll_switch(&mut self) -> Option<u8>;
}

/// Whether `(row, col)` addresses a square on the board
pub fn on_board(row: usize, col: usize) -> bool {
    row < ROWS && col < COLS
}

/// Rate limit for switch readings.
///
/// Once a reading is accepted, the bank is not read again until the interval
/// has elapsed.
#[derive(Debug, Clone)]
pub struct SwitchDebounce {
    min_interval_ms: u64,
    last_accept_ms: u64,
    has_accepted: bool,
}

impl SwitchDebounce {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_accept_ms: 0,
            has_accepted: false,
        }
    }

    /// Whether the bank may be read at `now_ms`.
    pub fn ready(&self, now_ms: u64) -> bool {
        !self.has_accepted || now_ms.saturating_sub(self.last_accept_ms) >= self.min_interval_ms
    }

    /// Record an accepted reading at `now_ms`.
    pub fn accept(&mut self, now_ms: u64) {
        self.has_accepted = true;
        self.last_accept_ms = now_ms;
    }
}

impl Default for SwitchDebounce {
    fn default() -> Self {
        Self::new(SWITCH_DEBOUNCE_MS)
    }
}

/// Wraps a raw switch bank with [`SwitchDebounce`].
pub struct Debounced<S> {
    inner: S,
    debounce: SwitchDebounce,
    epoch: Instant,
}

impl<S: SwitchBank> Debounced<S> {
    pub fn new(inner: S) -> Self {
        Self::with_debounce(inner, SwitchDebounce::default())
    }

    pub fn with_debounce(inner: S, debounce: SwitchDebounce) -> Self {
        Self {
            inner,
            debounce,
            epoch: Instant::now(),
        }
    }
}

impl<S: SwitchBank> SwitchBank for Debounced<S> {
    fn poll_switch(&mut self) -> Option<u8> {
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        if !self.debounce.ready(now_ms) {
            return None;
        }
        let col = self.inner.poll_switch()?;
        self.debounce.accept(now_ms);
        Some(col)
    }
}
