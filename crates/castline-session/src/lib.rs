//! Session lifecycle for a real-time screen-share client.
//!
//! The media SDK does the real work: negotiation, transport, encoding.
//! This crate owns the state machine around it. A [`SessionController`]
//! holds the session handle, the local [`Publication`] and one
//! [`Subscription`] per remote stream, and moves through
//! `Idle → Connecting → Connected → Disconnected` (or `Errored`) as
//! [`SessionEvent`]s arrive from the SDK.
//!
//! [`SessionDriver`] runs a controller on a single task so that commands
//! and SDK callbacks are serialized without locks. [`LoopbackSession`]
//! is an in-process SDK stand-in for demos and tests.

mod controller;
mod credentials;
mod driver;
mod error;
mod event;
mod handles;
mod loopback;
mod presenter;
mod sdk;

pub use controller::{SessionController, SessionState};
pub use credentials::Credentials;
pub use driver::{DriverHandle, SessionCommand, SessionDriver};
pub use error::{SdkError, SessionError};
pub use event::{event_channel, EventReceiver, EventSender, SessionEvent};
pub use handles::{CaptureSource, Publication, PublisherSettings, Subscription, SurfaceCapture};
pub use loopback::{LoopbackRemote, LoopbackSession, AUTH_ERROR_CODE, NOT_CONNECTED_CODE};
pub use presenter::{ChannelPresenter, Presenter};
pub use sdk::MediaSession;
