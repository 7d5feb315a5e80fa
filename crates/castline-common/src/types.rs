use serde::{Deserialize, Serialize};

/// Kind of video a publication carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    #[default]
    Screen,
    Camera,
}

/// Quality preset for an outgoing stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareQuality {
    /// 720p, 10fps — low bandwidth.
    Low,
    /// 1080p, 15fps.
    #[default]
    Medium,
    /// 1080p, 30fps.
    High,
    /// Native resolution, 30fps.
    Ultra,
}

impl ShareQuality {
    pub fn max_width(&self) -> u32 {
        match self {
            Self::Low => 1280,
            Self::Medium | Self::High => 1920,
            Self::Ultra => 3840,
        }
    }

    pub fn max_height(&self) -> u32 {
        match self {
            Self::Low => 720,
            Self::Medium | Self::High => 1080,
            Self::Ultra => 2160,
        }
    }

    pub fn max_fps(&self) -> u32 {
        match self {
            Self::Low => 10,
            Self::Medium => 15,
            Self::High | Self::Ultra => 30,
        }
    }
}
