//! Video trend pipeline.
//!
//! Fetches trend points and per-video metadata from the analytics API,
//! joins them, categorizes videos, and aggregates views into
//! category-by-bucket series for stacked charts.

pub mod aggregate;
pub mod availability;
pub mod bucket;
pub mod combine;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;

pub use aggregate::{aggregate, metric_values};
pub use availability::probe_availability;
pub use bucket::bucket_key;
pub use combine::{combine, filter_by_category, unique_video_ids, unique_videos};
pub use config::{DetailFailurePolicy, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{compare, Comparison, SearchQuery, SearchResult, TrendPipeline, ViewOptions};
pub use session::DashboardState;
