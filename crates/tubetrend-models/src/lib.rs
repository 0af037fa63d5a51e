//! Shared data models for TubeTrend.
//!
//! This crate provides Serde-serializable types for:
//! - Trend observations and video metadata
//! - Video categories and the categorization rule
//! - Search inputs (terms, date ranges, category selection)
//! - Aggregated, time-bucketed series

pub mod category;
pub mod search;
pub mod series;
pub mod trend;
pub mod video;

// Re-export common types
pub use category::{categorize, VideoCategory, SHORT_MAX_DURATION_SECS};
pub use search::{CategorySelection, DateRange, DateRangePreset, RangeError, SearchTerms};
pub use series::{AggregatedSeries, BucketKey, Granularity, Metric, SeriesRow};
pub use trend::{CombinedRecord, TrendPoint};
pub use video::{VideoDetail, VideoId, VideoSummary};
