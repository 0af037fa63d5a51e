//! Time-bucketed series produced by the aggregator.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::VideoCategory;

/// Calendar bucket size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(format!("unknown granularity: {}", other)),
        }
    }
}

/// Metric summed per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Cumulative views as reported on each point
    #[default]
    Views,
    /// Views added since the previous point of the same video
    ViewsGain,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::ViewsGain => "views_gain",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "views" => Ok(Metric::Views),
            "views_gain" | "gain" => Ok(Metric::ViewsGain),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

/// Start of a calendar bucket.
///
/// Ordering is by `start`, which is chronological for every granularity;
/// for weeks it matches `(iso_year, iso_week)` ordering. The label is for
/// display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct BucketKey {
    pub start: NaiveDate,
    pub granularity: Granularity,
}

impl BucketKey {
    /// ISO `(year, week)` of the bucket start.
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.start.iso_week();
        (week.year(), week.week())
    }

    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Day => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Week => {
                let (year, week) = self.iso_week();
                format!("W{} {}", week, year)
            }
            Granularity::Month => self.start.format("%Y-%m").to_string(),
            Granularity::Year => self.start.year().to_string(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One bucket of an aggregated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeriesRow {
    pub bucket: BucketKey,
    pub label: String,
    /// Values aligned with `AggregatedSeries::categories`
    pub values: Vec<u64>,
}

/// Bucket-indexed table with one column per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AggregatedSeries {
    pub granularity: Granularity,
    pub metric: Metric,
    pub categories: Vec<VideoCategory>,
    pub rows: Vec<SeriesRow>,
}

impl AggregatedSeries {
    pub fn empty(granularity: Granularity, metric: Metric) -> Self {
        Self {
            granularity,
            metric,
            categories: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, category: VideoCategory) -> Option<usize> {
        self.categories.iter().position(|c| *c == category)
    }

    /// Value of one cell, `None` if the bucket or column is absent.
    pub fn value(&self, bucket: &BucketKey, category: VideoCategory) -> Option<u64> {
        let col = self.column_index(category)?;
        self.rows
            .iter()
            .find(|row| row.bucket == *bucket)
            .map(|row| row.values[col])
    }

    /// Full column for a category in bucket order.
    pub fn column(&self, category: VideoCategory) -> Option<Vec<u64>> {
        let col = self.column_index(category)?;
        Some(self.rows.iter().map(|row| row.values[col]).collect())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    /// Sum over every cell.
    pub fn total(&self) -> u64 {
        self.rows.iter().flat_map(|row| row.values.iter()).sum()
    }
}
