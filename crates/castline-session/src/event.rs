//! Callbacks from the media SDK, flattened into one event type.

use castline_common::StreamId;
use tokio::sync::mpsc;

use crate::error::SdkError;

/// Everything the session layer can tell the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session finished connecting.
    Connected,
    /// The session is gone, either on request or because the link dropped.
    Disconnected,
    /// A stream appeared in the session.
    StreamCreated(StreamId),
    /// A stream left the session.
    StreamDestroyed(StreamId),
    /// Asynchronous session failure. Fatal.
    Error(SdkError),
    /// The local publication is live under this stream id.
    PublisherStreamCreated(StreamId),
    /// The local publication stopped.
    PublisherStreamDestroyed(StreamId),
    /// Asynchronous publisher failure. Not fatal to the session.
    PublisherError(SdkError),
    /// A subscriber started receiving media.
    SubscriberConnected(StreamId),
    /// Asynchronous subscriber failure. Not fatal to the session.
    SubscriberError(StreamId, SdkError),
}

/// Delegate handed to the SDK; callable from any thread.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Create the channel that carries SDK callbacks onto the driver task.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
