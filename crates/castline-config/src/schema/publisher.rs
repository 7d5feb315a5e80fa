//! Outgoing stream settings.

use castline_common::{ShareQuality, VideoType};
use serde::{Deserialize, Serialize};

/// Settings applied to the local publication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Display name advertised with the stream. Empty means "use the host name".
    pub name: String,
    pub video_type: VideoType,
    /// Let the SDK drop to audio-only when bandwidth is poor.
    pub audio_fallback: bool,
    pub quality: ShareQuality,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            video_type: VideoType::Screen,
            audio_fallback: false,
            quality: ShareQuality::Medium,
        }
    }
}
