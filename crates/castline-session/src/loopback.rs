//! In-process session layer.
//!
//! Answers every request with the callbacks a real service would send,
//! without any network. The published stream can be echoed back as a
//! remote stream, and [`LoopbackRemote`] lets other tasks add or remove
//! simulated participants.

use castline_common::StreamId;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::SdkError;
use crate::event::{EventSender, SessionEvent};
use crate::handles::{Publication, Subscription};
use crate::sdk::MediaSession;

/// Error code for a rejected token.
pub const AUTH_ERROR_CODE: i32 = 1004;
/// Error code for operations on a session that is not connected.
pub const NOT_CONNECTED_CODE: i32 = 1010;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct LoopbackSession {
    events: EventSender,
    connected: bool,
    echo_own_stream: bool,
    own_stream: Option<StreamId>,
    initial_streams: Vec<StreamId>,
    fail_connect: Option<SdkError>,
    fail_publish: Option<SdkError>,
    fail_subscribe: Option<SdkError>,
}

impl LoopbackSession {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            connected: false,
            echo_own_stream: true,
            own_stream: None,
            initial_streams: Vec::new(),
            fail_connect: None,
            fail_publish: None,
            fail_subscribe: None,
        }
    }

    /// Announce our own published stream back as a session stream.
    pub fn echo_own_stream(mut self, enabled: bool) -> Self {
        self.echo_own_stream = enabled;
        self
    }

    /// Streams already present in the session when we connect.
    pub fn with_remote_streams(mut self, streams: impl IntoIterator<Item = StreamId>) -> Self {
        self.initial_streams.extend(streams);
        self
    }

    pub fn fail_connect(mut self, error: SdkError) -> Self {
        self.fail_connect = Some(error);
        self
    }

    pub fn fail_publish(mut self, error: SdkError) -> Self {
        self.fail_publish = Some(error);
        self
    }

    pub fn fail_subscribe(mut self, error: SdkError) -> Self {
        self.fail_subscribe = Some(error);
        self
    }

    /// A handle for injecting remote activity from other tasks.
    pub fn remote(&self) -> LoopbackRemote {
        LoopbackRemote {
            events: self.events.clone(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Loopback event dropped, receiver gone");
        }
    }

    fn ensure_connected(&self) -> Result<(), SdkError> {
        if self.connected {
            Ok(())
        } else {
            Err(SdkError::new(NOT_CONNECTED_CODE, "Session is not connected"))
        }
    }
}

impl MediaSession for LoopbackSession {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), SdkError> {
        if let Some(e) = self.fail_connect.clone() {
            return Err(e);
        }
        if credentials.token().is_empty() {
            return Err(SdkError::new(
                AUTH_ERROR_CODE,
                "Authentication error: token is empty",
            ));
        }

        self.connected = true;
        self.emit(SessionEvent::Connected);
        for stream_id in &self.initial_streams {
            self.emit(SessionEvent::StreamCreated(stream_id.clone()));
        }
        Ok(())
    }

    fn publish(&mut self, publication: &Publication) -> Result<(), SdkError> {
        self.ensure_connected()?;
        if let Some(e) = self.fail_publish.clone() {
            return Err(e);
        }

        let stream_id = StreamId::generate();
        debug!(
            stream_id = %stream_id,
            surface = publication.capture().surface(),
            video_type = ?publication.video_type(),
            "Loopback publish"
        );
        self.own_stream = Some(stream_id.clone());
        self.emit(SessionEvent::PublisherStreamCreated(stream_id.clone()));
        if self.echo_own_stream {
            self.emit(SessionEvent::StreamCreated(stream_id));
        }
        Ok(())
    }

    fn subscribe(&mut self, subscription: &Subscription) -> Result<(), SdkError> {
        self.ensure_connected()?;
        if let Some(e) = self.fail_subscribe.clone() {
            return Err(e);
        }
        self.emit(SessionEvent::SubscriberConnected(
            subscription.stream_id().clone(),
        ));
        Ok(())
    }

    fn unsubscribe(&mut self, _stream_id: &StreamId) -> Result<(), SdkError> {
        self.ensure_connected()
    }

    fn disconnect(&mut self) -> Result<(), SdkError> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        if let Some(stream_id) = self.own_stream.take() {
            self.emit(SessionEvent::PublisherStreamDestroyed(stream_id));
        }
        self.emit(SessionEvent::Disconnected);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

/// Injects simulated remote activity into a loopback session.
#[derive(Debug, Clone)]
pub struct LoopbackRemote {
    events: EventSender,
}

impl LoopbackRemote {
    /// A new participant starts publishing. Returns its stream id.
    pub fn add_remote_stream(&self) -> StreamId {
        let stream_id = StreamId::generate();
        let _ = self.events.send(SessionEvent::StreamCreated(stream_id.clone()));
        stream_id
    }

    pub fn remove_remote_stream(&self, stream_id: StreamId) {
        let _ = self.events.send(SessionEvent::StreamDestroyed(stream_id));
    }

    /// Simulate the service dropping the session.
    pub fn fail_session(&self, error: SdkError) {
        let _ = self.events.send(SessionEvent::Error(error));
    }

    pub fn drop_connection(&self) {
        let _ = self.events.send(SessionEvent::Disconnected);
    }
}
