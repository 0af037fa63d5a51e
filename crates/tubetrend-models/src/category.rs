//! Video categorization.
//!
//! Every video falls into exactly one category. The live flag takes
//! precedence over duration; records without metadata are `Unknown`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::video::VideoDetail;

/// Videos shorter than this many seconds are Shorts.
pub const SHORT_MAX_DURATION_SECS: f64 = 62.0;

/// Derived video category.
///
/// Declaration order is the column order of aggregated series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VideoCategory {
    Short,
    Video,
    /// Shown as "Directo" in the dashboard
    Livestream,
    /// Trend point with no matching detail record
    Unknown,
}

impl VideoCategory {
    /// Categories a user can select.
    pub const SELECTABLE: [VideoCategory; 3] = [
        VideoCategory::Short,
        VideoCategory::Video,
        VideoCategory::Livestream,
    ];

    /// Category for an optional detail record.
    pub fn for_detail(detail: Option<&VideoDetail>) -> Self {
        match detail {
            Some(d) => categorize(d.was_live, d.duration_seconds),
            None => VideoCategory::Unknown,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            VideoCategory::Short => "Short",
            VideoCategory::Video => "Video",
            VideoCategory::Livestream => "Directo",
            VideoCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for VideoCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" | "shorts" => Ok(VideoCategory::Short),
            "video" | "videos" => Ok(VideoCategory::Video),
            "livestream" | "live" | "directo" | "directos" => Ok(VideoCategory::Livestream),
            "unknown" => Ok(VideoCategory::Unknown),
            other => Err(format!("unknown video category: {}", other)),
        }
    }
}

/// Classify a video from its live flag and duration.
pub fn categorize(was_live: bool, duration_seconds: f64) -> VideoCategory {
    if was_live {
        VideoCategory::Livestream
    } else if duration_seconds < SHORT_MAX_DURATION_SECS {
        VideoCategory::Short
    } else {
        VideoCategory::Video
    }
}
