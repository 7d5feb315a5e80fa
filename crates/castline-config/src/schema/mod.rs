//! Configuration schema types for castline.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod publisher;
mod session;
mod subscriber;
mod system;

pub use publisher::*;
pub use session::*;
pub use subscriber::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CastlineConfig {
    pub session: SessionConfig,
    pub publisher: PublisherConfig,
    pub subscriber: SubscriberConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}
