pub mod errors;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{CastlineError, ConfigError};
pub use id::{new_id, StreamId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{ShareQuality, VideoType};

pub type Result<T> = std::result::Result<T, CastlineError>;
