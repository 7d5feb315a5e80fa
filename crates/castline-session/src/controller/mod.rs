//! The session state machine.

mod types;


pub use types::SessionState;

use std::collections::HashMap;
use std::sync::Arc;

use castline_common::StreamId;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::credentials::Credentials;
use crate::error::{SdkError, SessionError};
use crate::event::SessionEvent;
use crate::handles::{CaptureSource, Publication, PublisherSettings, Subscription};
use crate::presenter::Presenter;
use crate::sdk::MediaSession;

// ---------------------------------------------------------------------------
// Session Controller
// ---------------------------------------------------------------------------

/// Owns one media session and everything published or subscribed on it.
///
/// All methods take `&mut self`; the controller is meant to live on a
/// single task (see [`crate::SessionDriver`]) that also receives the SDK
/// callbacks, so commands and events never interleave.
pub struct SessionController<S: MediaSession> {
    credentials: Credentials,
    session: S,
    capture: Arc<dyn CaptureSource>,
    settings: PublisherSettings,
    presenter: Box<dyn Presenter>,
    subscribe_to_self: bool,
    state: SessionState,
    state_tx: watch::Sender<SessionState>,
    /// Set once `publish()` has run for the current Connected transition.
    publish_attempted: bool,
    publication: Option<Publication>,
    subscriptions: HashMap<StreamId, Subscription>,
}

impl<S: MediaSession> SessionController<S> {
    pub fn new(
        credentials: Credentials,
        session: S,
        capture: Arc<dyn CaptureSource>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        Self {
            credentials,
            session,
            capture,
            settings: PublisherSettings::default(),
            presenter,
            subscribe_to_self: false,
            state: SessionState::Idle,
            state_tx,
            publish_attempted: false,
            publication: None,
            subscriptions: HashMap::new(),
        }
    }

    /// Settings used for every publication this controller creates.
    pub fn with_publisher_settings(mut self, settings: PublisherSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Also subscribe to our own stream when the session announces it.
    pub fn with_subscribe_to_self(mut self, enabled: bool) -> Self {
        self.subscribe_to_self = enabled;
        self
    }

    // -- accessors ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Watch state transitions from another task.
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn publication(&self) -> Option<&Publication> {
        self.publication.as_ref()
    }

    pub fn subscription(&self, stream_id: &StreamId) -> Option<&Subscription> {
        self.subscriptions.get(stream_id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Subscribed stream ids, sorted.
    pub fn stream_ids(&self) -> Vec<StreamId> {
        let mut ids: Vec<StreamId> = self.subscriptions.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn media_session(&self) -> &S {
        &self.session
    }

    // -- commands -----------------------------------------------------------

    /// Start connecting. Completion arrives later as [`SessionEvent::Connected`].
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if !self.state.can_connect() {
            return Err(self.reject("connect"));
        }

        self.transition(SessionState::Connecting);
        info!(session_id = %self.credentials.session_id(), "Connecting to session");

        if let Err(e) = self.session.connect(&self.credentials) {
            return Err(self.fail(SessionError::Connect(e)));
        }
        Ok(())
    }

    /// Ask the SDK to leave the session. The state changes when
    /// [`SessionEvent::Disconnected`] arrives.
    pub fn disconnect(&mut self) -> Result<(), SessionError> {
        if !matches!(
            self.state,
            SessionState::Connecting | SessionState::Connected
        ) {
            return Err(self.reject("disconnect"));
        }

        if let Err(e) = self.session.disconnect() {
            let err = SessionError::Disconnect(e);
            self.report(&err);
            return Err(err);
        }
        Ok(())
    }

    /// Publish the capture source. Runs at most once per Connected transition.
    pub fn publish(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(self.reject("publish"));
        }
        if self.publish_attempted {
            warn!("Publish already attempted for this connection");
            return Err(SessionError::AlreadyPublished);
        }
        self.publish_attempted = true;

        let publication = Publication::new(
            self.credentials.session_id(),
            self.settings.clone(),
            Arc::clone(&self.capture),
        );

        match self.session.publish(&publication) {
            Ok(()) => {
                info!(
                    surface = publication.capture().surface(),
                    video_type = ?publication.video_type(),
                    quality = ?self.settings.quality,
                    "Publishing"
                );
                self.publication = Some(publication);
                Ok(())
            }
            Err(e) => {
                let err = SessionError::Publish(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Subscribe to a remote stream, replacing any existing subscription
    /// for the same id.
    pub fn subscribe(&mut self, stream_id: StreamId) -> Result<(), SessionError> {
        if self.state != SessionState::Connected {
            return Err(self.reject("subscribe"));
        }

        if self.subscriptions.remove(&stream_id).is_some() {
            debug!(stream_id = %stream_id, "Replacing existing subscription");
        }

        let subscription = Subscription::new(self.credentials.session_id(), stream_id.clone());
        match self.session.subscribe(&subscription) {
            Ok(()) => {
                info!(stream_id = %stream_id, "Subscribed");
                self.subscriptions.insert(stream_id, subscription);
                Ok(())
            }
            Err(source) => {
                let err = SessionError::Subscribe { stream_id, source };
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Drop the subscription for `stream_id`. Returns whether one existed.
    /// The subscription is kept if the session layer refuses.
    pub fn unsubscribe(&mut self, stream_id: &StreamId) -> Result<bool, SessionError> {
        if !self.subscriptions.contains_key(stream_id) {
            return Ok(false);
        }
        if let Err(source) = self.session.unsubscribe(stream_id) {
            let err = SessionError::Subscribe {
                stream_id: stream_id.clone(),
                source,
            };
            self.report(&err);
            return Err(err);
        }
        self.subscriptions.remove(stream_id);
        info!(stream_id = %stream_id, "Unsubscribed");
        Ok(true)
    }

    // -- events -------------------------------------------------------------

    /// Apply one callback from the session layer.
    pub fn handle(&mut self, event: SessionEvent) {
        if self.state.is_terminal() {
            if let SessionEvent::Error(e) = event {
                self.report(&SessionError::Session(e));
            } else {
                debug!(?event, "Ignoring event in errored session");
            }
            return;
        }

        match event {
            SessionEvent::Connected => self.on_connected(),
            SessionEvent::Disconnected => self.on_disconnected(),
            SessionEvent::StreamCreated(id) => self.on_stream_created(id),
            SessionEvent::StreamDestroyed(id) => self.on_stream_destroyed(&id),
            SessionEvent::Error(e) => self.on_session_error(e),
            SessionEvent::PublisherStreamCreated(id) => self.on_publisher_stream_created(id),
            SessionEvent::PublisherStreamDestroyed(id) => self.on_publisher_stream_destroyed(&id),
            SessionEvent::PublisherError(e) => self.on_publisher_error(e),
            SessionEvent::SubscriberConnected(id) => self.on_subscriber_connected(&id),
            SessionEvent::SubscriberError(id, e) => self.on_subscriber_error(id, e),
        }
    }

    fn on_connected(&mut self) {
        if self.state != SessionState::Connecting {
            warn!(state = %self.state, "Unexpected connected callback");
            return;
        }
        self.transition(SessionState::Connected);
        self.publish_attempted = false;
        // Failures are already reported to the presenter.
        let _ = self.publish();
    }

    fn on_disconnected(&mut self) {
        if !matches!(
            self.state,
            SessionState::Connecting | SessionState::Connected
        ) {
            debug!(state = %self.state, "Ignoring disconnected callback");
            return;
        }
        self.release_handles();
        self.transition(SessionState::Disconnected);
    }

    fn on_stream_created(&mut self, stream_id: StreamId) {
        if self.state != SessionState::Connected {
            debug!(stream_id = %stream_id, state = %self.state, "Stream created before connect, ignoring");
            return;
        }
        if !self.subscribe_to_self && self.is_own_stream(&stream_id) {
            debug!(stream_id = %stream_id, "Skipping own stream");
            return;
        }
        let _ = self.subscribe(stream_id);
    }

    fn on_stream_destroyed(&mut self, stream_id: &StreamId) {
        // Destroy notifications may race local state; unknown ids are fine.
        if self.subscriptions.remove(stream_id).is_some() {
            info!(stream_id = %stream_id, "Remote stream gone, subscription released");
        } else {
            debug!(stream_id = %stream_id, "Destroy for unknown stream");
        }
    }

    fn on_session_error(&mut self, error: SdkError) {
        self.fail(SessionError::Session(error));
    }

    fn on_publisher_stream_created(&mut self, stream_id: StreamId) {
        match self.publication.as_mut() {
            Some(publication) => {
                info!(stream_id = %stream_id, "Publication live");
                publication.set_stream_id(stream_id);
            }
            None => debug!(stream_id = %stream_id, "Publisher stream without publication"),
        }
    }

    fn on_publisher_stream_destroyed(&mut self, stream_id: &StreamId) {
        let ours = self
            .publication
            .as_ref()
            .and_then(Publication::stream_id)
            .is_some_and(|own| own == stream_id);
        if ours {
            info!(stream_id = %stream_id, "Publication stopped");
            self.publication = None;
        }
    }

    fn on_publisher_error(&mut self, error: SdkError) {
        self.publication = None;
        self.report(&SessionError::Publish(error));
    }

    fn on_subscriber_connected(&mut self, stream_id: &StreamId) {
        if let Some(subscription) = self.subscriptions.get_mut(stream_id) {
            subscription.mark_connected();
            info!(stream_id = %stream_id, "Subscriber receiving media");
        }
    }

    fn on_subscriber_error(&mut self, stream_id: StreamId, source: SdkError) {
        self.subscriptions.remove(&stream_id);
        self.report(&SessionError::Subscribe { stream_id, source });
    }

    // -- helpers ------------------------------------------------------------

    fn is_own_stream(&self, stream_id: &StreamId) -> bool {
        self.publication
            .as_ref()
            .and_then(Publication::stream_id)
            .is_some_and(|own| own == stream_id)
    }

    fn transition(&mut self, next: SessionState) {
        if self.state == next {
            return;
        }
        info!(from = %self.state, to = %next, "Session state changed");
        self.state = next;
        self.state_tx.send_replace(next);
    }

    fn release_handles(&mut self) {
        let released = self.subscriptions.len();
        self.subscriptions.clear();
        self.publication = None;
        self.publish_attempted = false;
        debug!(subscriptions = released, "Released session handles");
    }

    /// Enter `Errored`, drop all handles and report.
    fn fail(&mut self, error: SessionError) -> SessionError {
        self.release_handles();
        self.transition(SessionState::Errored);
        self.report(&error);
        error
    }

    fn reject(&self, action: &'static str) -> SessionError {
        warn!(action, state = %self.state, "Rejected in current state");
        SessionError::InvalidState {
            action,
            state: self.state,
        }
    }

    fn report(&self, error: &SessionError) {
        warn!(error = %error, "Reporting session error");
        self.presenter.notify_error(&error.to_string());
    }
}
