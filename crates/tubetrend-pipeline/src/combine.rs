//! Joining trend points with video metadata, and category filtering.

use std::collections::{HashMap, HashSet};

use tubetrend_models::{CombinedRecord, TrendPoint, VideoCategory, VideoDetail, VideoId, VideoSummary};

/// Unique video ids in order of first appearance.
pub fn unique_video_ids(points: &[TrendPoint]) -> Vec<VideoId> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter(|p| seen.insert(&p.video_id))
        .map(|p| p.video_id.clone())
        .collect()
}

/// Left join of `trends` with `details` on `video_id`.
///
/// Output order follows `trends`. If several details share an id the first
/// one wins; points with no detail get `None` metadata and `Unknown`.
pub fn combine(trends: &[TrendPoint], details: &[VideoDetail]) -> Vec<CombinedRecord> {
    let mut by_id: HashMap<&VideoId, &VideoDetail> = HashMap::with_capacity(details.len());
    for detail in details {
        by_id.entry(&detail.video_id).or_insert(detail);
    }

    trends
        .iter()
        .map(|point| CombinedRecord::join(point, by_id.get(&point.video_id).copied()))
        .collect()
}

/// Keep records whose category is in `allowed`.
///
/// An empty `allowed` set means "all categories" (the select-all checkbox),
/// not "none".
pub fn filter_by_category(
    records: &[CombinedRecord],
    allowed: &HashSet<VideoCategory>,
) -> Vec<CombinedRecord> {
    if allowed.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| allowed.contains(&r.category))
        .cloned()
        .collect()
}

/// One summary per video in first-seen order.
pub fn unique_videos(records: &[CombinedRecord]) -> Vec<VideoSummary> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(&r.video_id))
        .map(CombinedRecord::summary)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(id: &str, day: u32, views: u64) -> TrendPoint {
        TrendPoint {
            video_id: VideoId::from(id),
            platform: "youtube".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            views,
            engagements: 0,
        }
    }

    fn detail(id: &str, duration: f64, was_live: bool) -> VideoDetail {
        VideoDetail {
            video_id: VideoId::from(id),
            title: format!("title {}", id),
            duration_seconds: duration,
            publish_date: "2023-12-01".to_string(),
            thumbnail_url: format!("https://i.ytimg.com/vi/{}/default.jpg", id),
            video_url: format!("https://www.youtube.com/watch?v={}", id),
            was_live,
        }
    }

    fn sample() -> Vec<CombinedRecord> {
        let points = vec![
            point("short", 1, 10),
            point("long", 1, 20),
            point("live", 2, 30),
            point("ghost", 2, 40),
        ];
        let details = vec![
            detail("short", 20.0, false),
            detail("long", 900.0, false),
            detail("live", 30.0, true),
        ];
        combine(&points, &details)
    }

    #[test]
    fn test_unique_video_ids_keeps_discovery_order() {
        let points = vec![point("b", 1, 1), point("a", 1, 1), point("b", 2, 2)];
        assert_eq!(
            unique_video_ids(&points),
            vec![VideoId::from("b"), VideoId::from("a")]
        );
    }

    #[test]
    fn test_combine_left_join() {
        let records = sample();
        assert_eq!(records.len(), 4);

        let categories: Vec<VideoCategory> = records.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                VideoCategory::Short,
                VideoCategory::Video,
                VideoCategory::Livestream,
                VideoCategory::Unknown,
            ]
        );
        assert!(records[3].title.is_none());
        assert_eq!(records[3].views, 40);
    }

    #[test]
    fn test_combine_first_detail_wins() {
        let points = vec![point("a", 1, 1)];
        let details = vec![detail("a", 10.0, false), detail("a", 500.0, false)];
        let records = combine(&points, &details);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_seconds, Some(10.0));
    }

    #[test]
    fn test_filter_empty_selection_keeps_everything() {
        let records = sample();
        assert_eq!(filter_by_category(&records, &HashSet::new()), records);
    }

    #[test]
    fn test_filter_subset() {
        let records = sample();
        let allowed = HashSet::from([VideoCategory::Short, VideoCategory::Livestream]);
        let kept = filter_by_category(&records, &allowed);

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| allowed.contains(&r.category)));
    }

    #[test]
    fn test_filter_excludes_unknown_unless_requested() {
        let records = sample();
        let selectable: HashSet<VideoCategory> = VideoCategory::SELECTABLE.into_iter().collect();
        assert_eq!(filter_by_category(&records, &selectable).len(), 3);

        let unknown = HashSet::from([VideoCategory::Unknown]);
        assert_eq!(filter_by_category(&records, &unknown).len(), 1);
    }

    #[test]
    fn test_unique_videos() {
        let mut records = sample();
        records.push(records[0].clone());

        let videos = unique_videos(&records);
        assert_eq!(videos.len(), 4);
        assert_eq!(videos[0].video_id, VideoId::from("short"));
        assert_eq!(videos[3].title, None);
    }
}
