//! Response normalization.
//!
//! Raw API responses are decoded into typed records. A missing or mistyped
//! key is reported with its JSON path (`trends[0].points[2].views`).

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};
use tubetrend_models::{TrendPoint, VideoDetail, VideoId};

use crate::error::{ClientError, ClientResult};

/// Remaining API allowance reported by `rate_limit.details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDetails {
    pub concurrency_remaining: u64,
}

#[derive(Debug, Deserialize)]
struct TrendsResponse {
    trends: Vec<RawTrend>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    id: String,
    platform: String,
    points: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    #[serde(deserialize_with = "date")]
    date: NaiveDate,
    #[serde(deserialize_with = "count")]
    views: u64,
    #[serde(deserialize_with = "count")]
    engagements: u64,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    videos: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
struct RawVideoId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    video_id: RawVideoId,
    title: String,
    duration: f64,
    publish_date: String,
    thumbnail_url: String,
    video_url: String,
    #[serde(default)]
    video_was_live: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RateLimitsResponse {
    rate_limits: RawRateLimits,
}

#[derive(Debug, Deserialize)]
struct RawRateLimits {
    #[serde(rename = "Concurrency")]
    concurrency: RawConcurrency,
}

#[derive(Debug, Deserialize)]
struct RawConcurrency {
    #[serde(deserialize_with = "count")]
    remaining: u64,
}

/// Flatten a `video.trends` response into one row per point.
pub fn normalize_trends(response: &Value) -> ClientResult<Vec<TrendPoint>> {
    let decoded: TrendsResponse = decode(response)?;

    let points = decoded
        .trends
        .into_iter()
        .flat_map(|trend| {
            let video_id = VideoId::from(trend.id);
            let platform = trend.platform;
            trend.points.into_iter().map(move |point| TrendPoint {
                video_id: video_id.clone(),
                platform: platform.clone(),
                date: point.date,
                views: point.views,
                engagements: point.engagements,
            })
        })
        .collect();

    Ok(points)
}

/// Decode a `video.search` response into detail records.
///
/// `video_was_live` defaults to `false`; every other field is required.
pub fn normalize_details(response: &Value) -> ClientResult<Vec<VideoDetail>> {
    let decoded: DetailsResponse = decode(response)?;

    Ok(decoded
        .videos
        .into_iter()
        .map(|video| VideoDetail {
            video_id: VideoId::from(video.video_id.id),
            title: video.title,
            duration_seconds: video.duration,
            publish_date: video.publish_date,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            was_live: video.video_was_live.unwrap_or(false),
        })
        .collect())
}

/// Decode `rate_limits.Concurrency.remaining`.
pub fn normalize_rate_limits(response: &Value) -> ClientResult<RateLimitDetails> {
    let decoded: RateLimitsResponse = decode(response)?;

    Ok(RateLimitDetails {
        concurrency_remaining: decoded.rate_limits.concurrency.remaining,
    })
}

/// Deserialize with path tracking. Missing keys are reported at the key
/// itself rather than at the enclosing object.
fn decode<'a, T: Deserialize<'a>>(response: &'a Value) -> ClientResult<T> {
    serde_path_to_error::deserialize(response).map_err(|err| {
        let path = err.path().to_string();
        let message = err.into_inner().to_string();

        if let Some(key) = missing_field(&message) {
            return ClientError::malformed(join_path(&path, key), "is missing");
        }
        if is_root(&path) {
            ClientError::malformed("$", message)
        } else {
            ClientError::malformed(path, message)
        }
    })
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == "."
}

fn join_path(parent: &str, key: &str) -> String {
    if is_root(parent) {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Counts are integers, but some payloads carry them as whole floats.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            number
        ))),
    }
}

fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw)))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
