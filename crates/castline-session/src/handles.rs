//! Publication and subscription handles, and the capture-source seam.

use std::fmt;
use std::sync::Arc;

use castline_common::{ShareQuality, StreamId, VideoType};

// ---------------------------------------------------------------------------
// Capture source
// ---------------------------------------------------------------------------

/// A producer of video frames for a publication.
///
/// Frame delivery is between the source and the SDK. The controller only
/// holds the handle and binds it to the publication.
pub trait CaptureSource: Send + Sync + fmt::Debug {
    /// Human-readable name of what is being captured.
    fn surface(&self) -> &str;

    /// What kind of video the source produces. Publications take their
    /// video type from here.
    fn video_type(&self) -> VideoType;
}

/// Capture source bound to a named display surface.
#[derive(Debug, Clone)]
pub struct SurfaceCapture {
    surface: String,
    video_type: VideoType,
}

impl SurfaceCapture {
    /// A screen capture of `surface`.
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            video_type: VideoType::Screen,
        }
    }

    pub fn with_video_type(mut self, video_type: VideoType) -> Self {
        self.video_type = video_type;
        self
    }
}

impl CaptureSource for SurfaceCapture {
    fn surface(&self) -> &str {
        &self.surface
    }

    fn video_type(&self) -> VideoType {
        self.video_type
    }
}

// ---------------------------------------------------------------------------
// Publication
// ---------------------------------------------------------------------------

/// Settings for the local outgoing stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherSettings {
    pub name: String,
    pub audio_fallback: bool,
    pub quality: ShareQuality,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            audio_fallback: false,
            quality: ShareQuality::Medium,
        }
    }
}

/// The local outgoing stream.
#[derive(Debug, Clone)]
pub struct Publication {
    session_id: String,
    settings: PublisherSettings,
    capture: Arc<dyn CaptureSource>,
    stream_id: Option<StreamId>,
}

impl Publication {
    pub(crate) fn new(
        session_id: &str,
        settings: PublisherSettings,
        capture: Arc<dyn CaptureSource>,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            settings,
            capture,
            stream_id: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn settings(&self) -> &PublisherSettings {
        &self.settings
    }

    pub fn capture(&self) -> &dyn CaptureSource {
        self.capture.as_ref()
    }

    pub fn video_type(&self) -> VideoType {
        self.capture.video_type()
    }

    /// Our own stream id, once the session has announced it.
    pub fn stream_id(&self) -> Option<&StreamId> {
        self.stream_id.as_ref()
    }

    pub(crate) fn set_stream_id(&mut self, stream_id: StreamId) {
        self.stream_id = Some(stream_id);
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A handle receiving one remote stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    session_id: String,
    stream_id: StreamId,
    connected: bool,
}

impl Subscription {
    pub(crate) fn new(session_id: &str, stream_id: StreamId) -> Self {
        Self {
            session_id: session_id.to_string(),
            stream_id,
            connected: false,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }

    /// Whether media has started flowing for this subscription.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub(crate) fn mark_connected(&mut self) {
        self.connected = true;
    }
}
