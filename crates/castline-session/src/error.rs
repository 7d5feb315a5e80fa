//! Error taxonomy for session operations.

use castline_common::StreamId;

use crate::controller::SessionState;

/// A failure reported by the media SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct SdkError {
    pub code: i32,
    pub message: String,
}

impl SdkError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`crate::SessionController`].
///
/// `Connect` and `Session` are fatal to the session instance. `Publish`,
/// `Subscribe` and `Disconnect` leave the state unchanged. `InvalidState`,
/// `AlreadyPublished` and `DriverStopped` are returned to the caller only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("connect failed: {0}")]
    Connect(SdkError),

    #[error("publish failed: {0}")]
    Publish(SdkError),

    #[error("subscribe to stream {stream_id} failed: {source}")]
    Subscribe { stream_id: StreamId, source: SdkError },

    #[error("session error: {0}")]
    Session(SdkError),

    #[error("disconnect failed: {0}")]
    Disconnect(SdkError),

    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error("already published in this session")]
    AlreadyPublished,

    #[error("session driver is not running")]
    DriverStopped,
}

impl SessionError {
    /// Whether this error moves the session to `Errored`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Session(_))
    }
}
