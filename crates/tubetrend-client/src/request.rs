//! Query payloads for the trend-search and video-detail endpoints.
//!
//! Builders are pure: the same inputs always produce the same payload.

use serde::{Deserialize, Serialize};
use tubetrend_models::{DateRange, SearchTerms, VideoId};

/// Only YouTube videos are searched.
pub const PLATFORM: &str = "youtube";

/// Page size of a trend search.
pub const SCROLL_SIZE: u32 = 10;

/// Fields requested from the video search.
pub const DETAIL_FIELDS: [&str; 7] = [
    "video_id",
    "title",
    "duration",
    "publish_date",
    "thumbnail_url",
    "video_url",
    "video_was_live",
];

/// Include filter shared by both queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_gids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub include_filter: IncludeFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scroll {
    pub scroll_size: u32,
}

/// Body of a `video.trends` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSearchRequest {
    pub query: Query,
    pub date_range: DateRange,
    pub scroll: Scroll,
}

/// Body of a `video.search` request for a single video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDetailRequest {
    pub query: Query,
    pub fields: Vec<String>,
}

/// Build the trend search for the OR-combined terms over `range`.
///
/// Empty terms are not rejected; the API decides what an empty search means.
pub fn build_trend_request(terms: &SearchTerms, range: DateRange) -> TrendSearchRequest {
    TrendSearchRequest {
        query: Query {
            include_filter: IncludeFilter {
                search: Some(terms.combined_query()),
                video_platforms: Some(vec![PLATFORM.to_string()]),
                video_gids: None,
            },
        },
        date_range: range,
        scroll: Scroll {
            scroll_size: SCROLL_SIZE,
        },
    }
}

/// Build an exact-id detail lookup for one video.
pub fn build_detail_request(video_id: &VideoId) -> VideoDetailRequest {
    VideoDetailRequest {
        query: Query {
            include_filter: IncludeFilter {
                video_gids: Some(vec![video_id.gid()]),
                ..Default::default()
            },
        },
        fields: DETAIL_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_trend_request_shape() {
        let terms: SearchTerms = ["minecraft", "fortnite"].into_iter().collect();
        let payload = serde_json::to_value(build_trend_request(&terms, range())).unwrap();

        assert_eq!(
            payload,
            json!({
                "query": {
                    "include_filter": {
                        "search": "minecraft OR fortnite",
                        "video_platforms": ["youtube"]
                    }
                },
                "date_range": { "min": "2024-01-01", "max": "2024-01-31" },
                "scroll": { "scroll_size": 10 }
            })
        );
    }

    #[test]
    fn test_trend_request_is_deterministic() {
        let terms: SearchTerms = ["a", "b"].into_iter().collect();
        assert_eq!(
            build_trend_request(&terms, range()),
            build_trend_request(&terms, range())
        );
    }

    #[test]
    fn test_empty_search_is_passed_through() {
        let payload = build_trend_request(&SearchTerms::new(), range());
        assert_eq!(payload.query.include_filter.search.as_deref(), Some(""));
    }

    #[test]
    fn test_detail_request_shape() {
        let payload = serde_json::to_value(build_detail_request(&VideoId::from("abc123"))).unwrap();

        assert_eq!(payload["query"]["include_filter"]["video_gids"], json!(["ytv_abc123"]));
        assert!(payload["query"]["include_filter"].get("search").is_none());
        assert_eq!(payload["fields"].as_array().unwrap().len(), DETAIL_FIELDS.len());
        assert_eq!(payload["fields"][6], "video_was_live");
    }
}
