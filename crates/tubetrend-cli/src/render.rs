//! Plain-text rendering of pipeline output.

use std::fmt::Write;

use tubetrend_models::{AggregatedSeries, CombinedRecord, VideoSummary};

/// Render a series as aligned columns, one row per bucket.
pub fn series_table(series: &AggregatedSeries) -> String {
    if series.is_empty() {
        return format!("No {} data for the selected categories.\n", series.metric);
    }

    let mut header = vec![series.granularity.to_string()];
    header.extend(series.categories.iter().map(|c| c.label().to_string()));

    let body: Vec<Vec<String>> = series
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone()];
            cells.extend(row.values.iter().map(u64::to_string));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|cells| cells[col].len())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if col == 0 {
                    format!("{:<width$}", cell, width = widths[col])
                } else {
                    format!("{:>width$}", cell, width = widths[col])
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// Render the combined trend table, one line per point.
pub fn combined_table(records: &[CombinedRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "date\tvideo_id\tcategory\tviews\tengagements\ttitle");
    for record in records {
        let title = if record.has_detail() {
            record.title.as_deref().unwrap_or_default()
        } else {
            "(no details)"
        };
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.date, record.video_id, record.category, record.views, record.engagements, title
        );
    }
    out
}

/// Render the video list (`id - title  url`).
pub fn video_list(videos: &[VideoSummary]) -> String {
    let mut out = String::new();
    for video in videos {
        let _ = writeln!(
            out,
            "{} - {}  {}",
            video.video_id,
            video.title.as_deref().unwrap_or("(no details)"),
            video.video_url.as_deref().unwrap_or("")
        );
    }
    out
}
