//! Session lifecycle states.

use std::fmt;

/// Where the session is in its lifecycle.
///
/// `Errored` is absorbing: once entered, no event or command leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnected,
    Errored,
}

impl SessionState {
    /// `connect()` is accepted from here.
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Idle | Self::Disconnected)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Errored)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Errored => "errored",
        };
        f.write_str(name)
    }
}
