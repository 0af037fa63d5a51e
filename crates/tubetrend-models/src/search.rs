//! Search inputs: accumulated terms, date ranges, and category selection.

use chrono::{Datelike, Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::category::VideoCategory;

/// Ordered, de-duplicated search terms combined with `OR`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term. Blank and duplicate terms are ignored.
    ///
    /// Returns `true` if the term was added.
    pub fn add(&mut self, term: impl AsRef<str>) -> bool {
        let term = term.as_ref().trim();
        if term.is_empty() || self.0.iter().any(|t| t == term) {
            return false;
        }
        self.0.push(term.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Query string sent to the trend search (`a OR b OR c`).
    pub fn combined_query(&self) -> String {
        self.0.join(" OR ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut terms = SearchTerms::new();
        for term in iter {
            terms.add(term);
        }
        terms
    }
}

/// Date range errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Start date {min} is after end date {max}")]
    Inverted { min: NaiveDate, max: NaiveDate },
}

/// Inclusive date range for a trend search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateRange {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range of `days` days ending on `today`.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self {
            min: today - Duration::days(days),
            max: today,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Quick-pick date ranges offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    #[default]
    Last7Days,
    Last14Days,
    LastMonth,
    YearToDate,
    /// User supplies both dates
    Custom,
}

impl DateRangePreset {
    /// Resolve against `today`. `Custom` has no implied range.
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            DateRangePreset::Last7Days => Some(DateRange::last_days(today, 7)),
            DateRangePreset::Last14Days => Some(DateRange::last_days(today, 14)),
            DateRangePreset::LastMonth => Some(DateRange::last_days(today, 30)),
            DateRangePreset::YearToDate => {
                let jan_first = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                Some(DateRange {
                    min: jan_first,
                    max: today,
                })
            }
            DateRangePreset::Custom => None,
        }
    }
}

impl FromStr for DateRangePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last7" | "last_7_days" => Ok(DateRangePreset::Last7Days),
            "last14" | "last_14_days" => Ok(DateRangePreset::Last14Days),
            "last-month" | "last_month" => Ok(DateRangePreset::LastMonth),
            "ytd" | "year_to_date" => Ok(DateRangePreset::YearToDate),
            "custom" => Ok(DateRangePreset::Custom),
            other => Err(format!("unknown date range preset: {}", other)),
        }
    }
}

/// Dashboard category checkboxes.
///
/// "All" and the individual boxes are mutually exclusive in the UI. Both an
/// explicit "all" and an empty selection mean no filtering. Any ticked boxes
/// restrict to exactly those categories, so rows without details (`Unknown`)
/// only show up under "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySelection {
    pub shorts: bool,
    pub videos: bool,
    pub livestreams: bool,
    pub all: bool,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self {
            shorts: true,
            videos: true,
            livestreams: true,
            all: false,
        }
    }
}

impl CategorySelection {
    /// The "all" box alone.
    pub fn all() -> Self {
        Self {
            shorts: false,
            videos: false,
            livestreams: false,
            all: true,
        }
    }

    /// Selection from a list of categories. `Unknown` has no box and is ignored.
    pub fn from_categories(categories: &[VideoCategory]) -> Self {
        Self {
            shorts: categories.contains(&VideoCategory::Short),
            videos: categories.contains(&VideoCategory::Video),
            livestreams: categories.contains(&VideoCategory::Livestream),
            all: false,
        }
    }

    /// Toggle the "all" box; checking it clears the individual boxes.
    pub fn set_all(&mut self, checked: bool) {
        self.all = checked;
        if checked {
            self.shorts = false;
            self.videos = false;
            self.livestreams = false;
        }
    }

    /// Toggle one category; checking any clears "all".
    pub fn set(&mut self, category: VideoCategory, checked: bool) {
        match category {
            VideoCategory::Short => self.shorts = checked,
            VideoCategory::Video => self.videos = checked,
            VideoCategory::Livestream => self.livestreams = checked,
            VideoCategory::Unknown => return,
        }
        if self.shorts || self.videos || self.livestreams {
            self.all = false;
        }
    }

    /// Allowed set for `filter_by_category`. Empty means every category.
    pub fn allowed(&self) -> HashSet<VideoCategory> {
        if self.all {
            return HashSet::new();
        }

        [
            (self.shorts, VideoCategory::Short),
            (self.videos, VideoCategory::Video),
            (self.livestreams, VideoCategory::Livestream),
        ]
        .into_iter()
        .filter_map(|(on, category)| on.then_some(category))
        .collect()
    }
}
