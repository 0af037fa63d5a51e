//! Video identity and metadata models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform video identifier as reported by the analytics API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Global id used by the detail search filter (`ytv_<id>`).
    pub fn gid(&self) -> String {
        format!("ytv_{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Static metadata for a single video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoDetail {
    /// Platform video ID
    pub video_id: VideoId,

    /// Video title
    pub title: String,

    /// Duration in seconds
    pub duration_seconds: f64,

    /// Publish date as reported by the API
    pub publish_date: String,

    /// Thumbnail image URL
    pub thumbnail_url: String,

    /// Watch URL
    pub video_url: String,

    /// Whether the video was a livestream
    #[serde(default)]
    pub was_live: bool,
}

/// One row of the unique-video listing shown next to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSummary {
    pub video_id: VideoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
