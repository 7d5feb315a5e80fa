//! Incoming stream settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriberConfig {
    /// Subscribe to our own published stream when the session announces it.
    pub subscribe_to_self: bool,
}
