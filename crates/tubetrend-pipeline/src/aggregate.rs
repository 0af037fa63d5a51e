//! Time-bucketed aggregation of combined records.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;
use tubetrend_models::{
    AggregatedSeries, BucketKey, CombinedRecord, Granularity, Metric, SeriesRow, VideoCategory, VideoId,
};

use crate::bucket::bucket_key;

/// Per-record metric values, aligned with `records`.
///
/// For `ViewsGain` each point contributes the increase over the previous
/// point of the same video in date order; a video's first point counts 0
/// and drops in cumulative views saturate at 0.
pub fn metric_values(records: &[CombinedRecord], metric: Metric) -> Vec<u64> {
    match metric {
        Metric::Views => records.iter().map(|r| r.views).collect(),
        Metric::ViewsGain => {
            let mut by_video: HashMap<&VideoId, Vec<usize>> = HashMap::new();
            for (i, record) in records.iter().enumerate() {
                by_video.entry(&record.video_id).or_default().push(i);
            }

            let mut gains = vec![0u64; records.len()];
            for indices in by_video.values_mut() {
                indices.sort_by_key(|&i| records[i].date);
                for pair in indices.windows(2) {
                    let (prev, cur) = (&records[pair[0]], &records[pair[1]]);
                    gains[pair[1]] = cur.views.saturating_sub(prev.views);
                }
            }
            gains
        }
    }
}

/// Group by `(bucket, category)`, sum `metric`, and pivot.
///
/// Columns are the categories present in `records` in category order;
/// absent cells are 0 and rows are chronological.
pub fn aggregate(records: &[CombinedRecord], granularity: Granularity, metric: Metric) -> AggregatedSeries {
    if records.is_empty() {
        return AggregatedSeries::empty(granularity, metric);
    }

    let values = metric_values(records, metric);

    let mut cells: BTreeMap<BucketKey, BTreeMap<VideoCategory, u64>> = BTreeMap::new();
    let mut categories: BTreeSet<VideoCategory> = BTreeSet::new();

    for (record, value) in records.iter().zip(values) {
        let bucket = bucket_key(record.date, granularity);
        categories.insert(record.category);

        let cell = cells.entry(bucket).or_default().entry(record.category).or_insert(0);
        *cell = cell.saturating_add(value);
    }

    let categories: Vec<VideoCategory> = categories.into_iter().collect();
    let rows: Vec<SeriesRow> = cells
        .into_iter()
        .map(|(bucket, by_category)| SeriesRow {
            label: bucket.label(),
            values: categories
                .iter()
                .map(|c| by_category.get(c).copied().unwrap_or(0))
                .collect(),
            bucket,
        })
        .collect();

    debug!(
        records = records.len(),
        buckets = rows.len(),
        columns = categories.len(),
        granularity = %granularity,
        metric = %metric,
        "Aggregated series"
    );

    AggregatedSeries {
        granularity,
        metric,
        categories,
        rows,
    }
}
