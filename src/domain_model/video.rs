use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// Portrait reel target. Every stored video gets exactly these dimensions;
// caller-supplied width/height are discarded, not merged.
pub const VIDEO_WIDTH: u32 = 1080;
pub const VIDEO_HEIGHT: u32 = 1920;

pub const QUALITY_MIN: u8 = 1;
pub const QUALITY_MAX: u8 = 100;
pub const QUALITY_DEFAULT: u8 = 100;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct VideoId(pub uuid::Uuid);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VideoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(VideoId)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl Transformation {
    pub fn portrait(quality: u8) -> Self {
        Transformation {
            width: VIDEO_WIDTH,
            height: VIDEO_HEIGHT,
            quality,
        }
    }
}

/// A published catalog entry, exactly as persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: VideoId,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub transformation: Transformation,
    pub controls: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
