//! Calendar bucketing.

use chrono::{Datelike, Duration, NaiveDate};
use tubetrend_models::{BucketKey, Granularity};

/// Truncate `date` to the start of its bucket.
///
/// Weeks start on the ISO Monday, so a week straddling New Year belongs to
/// the ISO year of its Monday's week number.
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> BucketKey {
    let start = match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
        Granularity::Year => date.with_ordinal(1).unwrap_or(date),
    };

    BucketKey { start, granularity }
}
