//! Search orchestration: fetch trends, look up details, join.
//!
//! The pipeline holds no state between invocations. Callers that want to
//! keep a result around do so explicitly (see [`crate::session`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use tubetrend_client::{build_trend_request, TubularClient};
use tubetrend_models::{
    AggregatedSeries, CombinedRecord, DateRange, Granularity, Metric, SearchTerms, VideoCategory,
    VideoDetail, VideoId, VideoSummary,
};

use crate::aggregate::aggregate;
use crate::combine::{combine, filter_by_category, unique_video_ids, unique_videos};
use crate::config::{DetailFailurePolicy, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};

/// Above this many unique videos the sequential detail phase is logged as slow.
pub const DETAIL_FETCH_WARN_THRESHOLD: usize = 25;

/// Inputs of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub terms: SearchTerms,
    pub range: DateRange,
}

/// Output of one search, before any view options are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: SearchQuery,
    /// Full joined table, for raw export
    pub combined: Vec<CombinedRecord>,
    /// One detail record per video that resolved
    pub details: Vec<VideoDetail>,
    /// Videos dropped because their detail lookup failed
    pub skipped: Vec<VideoId>,
}

/// How the shell wants a result charted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Empty means every category
    pub categories: HashSet<VideoCategory>,
    pub granularity: Granularity,
    pub metric: Metric,
}

/// Chart-ready view of a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub series: AggregatedSeries,
    pub videos: Vec<VideoSummary>,
}

/// Filter, bucket, and pivot a search result.
pub fn compare(result: &SearchResult, options: &ViewOptions) -> Comparison {
    let filtered = filter_by_category(&result.combined, &options.categories);
    Comparison {
        series: aggregate(&filtered, options.granularity, options.metric),
        videos: unique_videos(&result.combined),
    }
}

/// Fetch/normalize/join pipeline over a [`TubularClient`].
pub struct TrendPipeline {
    client: TubularClient,
    config: PipelineConfig,
}

impl TrendPipeline {
    pub fn new(client: TubularClient, config: PipelineConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &TubularClient {
        &self.client
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one search.
    ///
    /// Detail lookups are issued one at a time in discovery order. A failed
    /// lookup is handled per [`DetailFailurePolicy`]; a lookup that returns
    /// no video leaves that video's rows in place as `Unknown`.
    #[instrument(skip(self, query), fields(search = %query.terms.combined_query(), range = %query.range))]
    pub async fn search(&self, query: &SearchQuery) -> PipelineResult<SearchResult> {
        let request = build_trend_request(&query.terms, query.range);
        info!("Fetching video trends");
        let mut points = self.client.fetch_trends(&request).await?;

        if points.is_empty() {
            return Err(PipelineError::empty_result(format!(
                "no trend data for '{}' in {}",
                query.terms.combined_query(),
                query.range
            )));
        }

        let video_ids = unique_video_ids(&points);
        info!(points = points.len(), videos = video_ids.len(), "Fetching video details");
        if video_ids.len() > DETAIL_FETCH_WARN_THRESHOLD {
            warn!(
                videos = video_ids.len(),
                "Detail lookups are sequential: one request per video"
            );
        }

        let mut details = Vec::with_capacity(video_ids.len());
        let mut skipped = Vec::new();

        for video_id in &video_ids {
            match self.client.fetch_video_details(video_id).await {
                Ok(found) => match found.into_iter().find(|d| d.video_id == *video_id) {
                    Some(detail) => details.push(detail),
                    None => warn!(video_id = %video_id, "No matching detail record returned"),
                },
                Err(e) => match self.config.detail_failure_policy {
                    DetailFailurePolicy::Skip => {
                        warn!(video_id = %video_id, error = %e, "Detail lookup failed, dropping video");
                        skipped.push(video_id.clone());
                    }
                    DetailFailurePolicy::Abort => return Err(e.into()),
                },
            }
        }

        if !skipped.is_empty() {
            let dropped: HashSet<&VideoId> = skipped.iter().collect();
            points.retain(|p| !dropped.contains(&p.video_id));
            if points.is_empty() {
                return Err(PipelineError::empty_result(format!(
                    "every detail lookup failed ({} videos)",
                    skipped.len()
                )));
            }
        }

        let combined = combine(&points, &details);
        info!(
            records = combined.len(),
            details = details.len(),
            skipped = skipped.len(),
            "Combined trend table built"
        );

        Ok(SearchResult {
            query: query.clone(),
            combined,
            details,
            skipped,
        })
    }
}
