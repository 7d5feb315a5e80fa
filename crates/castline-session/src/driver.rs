//! Runs a controller on one task, serializing commands and SDK callbacks.

use castline_common::StreamId;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::controller::SessionController;
use crate::error::SessionError;
use crate::event::EventReceiver;
use crate::sdk::MediaSession;

type Request = (SessionCommand, Option<oneshot::Sender<Result<(), SessionError>>>);

/// Commands sent to the driver from the application layer.
#[derive(Debug)]
pub enum SessionCommand {
    Connect,
    Disconnect,
    Unsubscribe(StreamId),
    /// Stop the driver and hand the controller back.
    Shutdown,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Cheap handle for sending commands to a running [`SessionDriver`].
#[derive(Debug, Clone)]
pub struct DriverHandle {
    command_tx: mpsc::Sender<Request>,
}

impl DriverHandle {
    /// Start connecting. Resolves once the request is issued, not when the
    /// session is up; watch the state for that.
    pub async fn connect(&self) -> Result<(), SessionError> {
        self.request(SessionCommand::Connect).await
    }

    pub async fn disconnect(&self) -> Result<(), SessionError> {
        self.request(SessionCommand::Disconnect).await
    }

    pub async fn unsubscribe(&self, stream_id: StreamId) -> Result<(), SessionError> {
        self.request(SessionCommand::Unsubscribe(stream_id)).await
    }

    /// Ask the driver to stop. Returns immediately.
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send((SessionCommand::Shutdown, None)).await;
    }

    async fn request(&self, command: SessionCommand) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send((command, Some(reply_tx)))
            .await
            .map_err(|_| SessionError::DriverStopped)?;
        reply_rx.await.unwrap_or(Err(SessionError::DriverStopped))
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Owns a [`SessionController`] and feeds it commands and events in order.
pub struct SessionDriver<S: MediaSession> {
    controller: SessionController<S>,
    events: EventReceiver,
    command_rx: mpsc::Receiver<Request>,
}

impl<S: MediaSession> SessionDriver<S> {
    pub fn new(controller: SessionController<S>, events: EventReceiver) -> (Self, DriverHandle) {
        let (command_tx, command_rx) = mpsc::channel(64);
        let driver = Self {
            controller,
            events,
            command_rx,
        };
        (driver, DriverHandle { command_tx })
    }

    pub fn controller(&self) -> &SessionController<S> {
        &self.controller
    }

    /// Process commands and events until shutdown, or until every command
    /// handle and the event sender are gone. Returns the controller.
    pub async fn run(mut self) -> SessionController<S> {
        info!("Session driver started");
        let mut commands_open = true;
        let mut events_open = true;

        while commands_open || events_open {
            // SDK callbacks already queued were issued before any newer
            // command, so they are applied first.
            tokio::select! {
                biased;

                event = self.events.recv(), if events_open => match event {
                    Some(event) => {
                        debug!(?event, "Session event");
                        self.controller.handle(event);
                    }
                    None => events_open = false,
                },
                cmd = self.command_rx.recv(), if commands_open => match cmd {
                    Some((SessionCommand::Shutdown, _)) => break,
                    Some((command, reply)) => {
                        let result = self.apply(command);
                        if let Some(reply) = reply {
                            let _ = reply.send(result);
                        }
                    }
                    None => commands_open = false,
                },
            }
        }

        info!(state = %self.controller.state(), "Session driver stopped");
        self.controller
    }

    fn apply(&mut self, command: SessionCommand) -> Result<(), SessionError> {
        match command {
            SessionCommand::Connect => self.controller.connect(),
            SessionCommand::Disconnect => self.controller.disconnect(),
            SessionCommand::Unsubscribe(stream_id) => {
                self.controller.unsubscribe(&stream_id).map(|_| ())
            }
            SessionCommand::Shutdown => Ok(()),
        }
    }
}
