//! Input channel configuration.

/// Which input channels are active for this process.
///
/// The keyboard listener is opened only when at least one of the other two
/// channels is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChannels {
    pub board_player: bool,
    pub web_player: bool,
}

impl Default for InputChannels {
    fn default() -> Self {
        Self {
            board_player: true,
            web_player: true,
        }
    }
}

impl InputChannels {
    /// Create from environment variables
    ///
    /// `C4_BOARD_PLAYER` and `C4_WEB_PLAYER` disable their channel when set to
    /// "0" or "false".
    pub fn from_env() -> Self {
        Self {
            board_player: env_flag("C4_BOARD_PLAYER", true),
            web_player: env_flag("C4_WEB_PLAYER", true),
        }
    }

    /// Keyboard-only testing mode
    pub fn keyboard_only(self) -> Self {
        Self {
            board_player: false,
            web_player: false,
        }
    }

    pub fn keyboard_enabled(&self) -> bool {
        !(self.board_player && self.web_player)
    }

    /// Whether one source may hold both seats.
    ///
    /// Only when the board and web channels are both disabled.
    pub fn allows_shared_seat(&self) -> bool {
        !self.board_player && !self.web_player
    }
}

/// Read an on/off environment variable.
///
/// Unset gives `default`; "0", "false" and "off" are off, anything else is on.
pub fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => {
            let v = v.trim().to_lowercase();
            !(v == "0" || v == "false" || v == "off")
        }
        Err(_) => default,
    }
}
