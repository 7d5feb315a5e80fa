use castline_common::StreamId;

use crate::credentials::Credentials;
use crate::error::SdkError;
use crate::handles::{Publication, Subscription};

/// The media SDK's session interface.
///
/// Every call is fire-and-forget: it either fails immediately or returns
/// `Ok` and reports the outcome later as a [`crate::SessionEvent`] on the
/// sender the implementation was built with.
pub trait MediaSession: Send {
    fn connect(&mut self, credentials: &Credentials) -> Result<(), SdkError>;

    fn publish(&mut self, publication: &Publication) -> Result<(), SdkError>;

    fn subscribe(&mut self, subscription: &Subscription) -> Result<(), SdkError>;

    fn unsubscribe(&mut self, stream_id: &StreamId) -> Result<(), SdkError>;

    fn disconnect(&mut self) -> Result<(), SdkError>;
}
