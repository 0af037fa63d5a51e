//! Trend observations and the joined records the aggregator works on.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::VideoCategory;
use crate::video::{VideoDetail, VideoId, VideoSummary};

/// One dated observation of a video's cumulative metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub video_id: VideoId,
    pub platform: String,
    pub date: NaiveDate,
    pub views: u64,
    pub engagements: u64,
}

/// A trend point left-joined with its video metadata.
///
/// Detail fields are `None` when the detail lookup found nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CombinedRecord {
    pub video_id: VideoId,
    pub platform: String,
    pub date: NaiveDate,
    pub views: u64,
    pub engagements: u64,
    pub title: Option<String>,
    pub duration_seconds: Option<f64>,
    pub publish_date: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub was_live: Option<bool>,
    pub category: VideoCategory,
}

impl CombinedRecord {
    /// Join a trend point with its (optional) detail record.
    pub fn join(point: &TrendPoint, detail: Option<&VideoDetail>) -> Self {
        Self {
            video_id: point.video_id.clone(),
            platform: point.platform.clone(),
            date: point.date,
            views: point.views,
            engagements: point.engagements,
            title: detail.map(|d| d.title.clone()),
            duration_seconds: detail.map(|d| d.duration_seconds),
            publish_date: detail.map(|d| d.publish_date.clone()),
            thumbnail_url: detail.map(|d| d.thumbnail_url.clone()),
            video_url: detail.map(|d| d.video_url.clone()),
            was_live: detail.map(|d| d.was_live),
            category: VideoCategory::for_detail(detail),
        }
    }

    /// Whether this record carries video metadata.
    pub fn has_detail(&self) -> bool {
        self.title.is_some()
    }

    pub fn summary(&self) -> VideoSummary {
        VideoSummary {
            video_id: self.video_id.clone(),
            title: self.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            video_url: self.video_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> TrendPoint {
        TrendPoint {
            video_id: VideoId::from("abc"),
            platform: "youtube".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            views: 100,
            engagements: 7,
        }
    }

    #[test]
    fn test_join_with_detail() {
        let detail = VideoDetail {
            video_id: VideoId::from("abc"),
            title: "Live set".to_string(),
            duration_seconds: 7200.0,
            publish_date: "2023-12-30".to_string(),
            thumbnail_url: "https://img.example/abc.jpg".to_string(),
            video_url: "https://youtube.com/watch?v=abc".to_string(),
            was_live: true,
        };

        let record = CombinedRecord::join(&point(), Some(&detail));
        assert!(record.has_detail());
        assert_eq!(record.category, VideoCategory::Livestream);
        assert_eq!(record.views, 100);
        assert_eq!(record.title.as_deref(), Some("Live set"));
    }

    #[test]
    fn test_join_without_detail() {
        let record = CombinedRecord::join(&point(), None);
        assert!(!record.has_detail());
        assert_eq!(record.category, VideoCategory::Unknown);
        assert_eq!(record.was_live, None);
        assert_eq!(record.summary().title, None);
    }

    #[test]
    fn test_trend_point_date_serializes_as_iso() {
        let json = serde_json::to_value(point()).unwrap();
        assert_eq!(json["date"], "2024-01-01");
    }
}
