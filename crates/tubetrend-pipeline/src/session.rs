//! Dashboard state held by the shell between interactions.
//!
//! Every operation takes the state by value and returns the next one, so
//! the pipeline itself never owns session data.

use serde::{Deserialize, Serialize};
use tubetrend_models::{DateRange, SearchTerms};

use crate::pipeline::{SearchQuery, SearchResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub terms: SearchTerms,
    pub last_result: Option<SearchResult>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search term; blanks and duplicates leave the state unchanged.
    pub fn add_term(mut self, term: impl AsRef<str>) -> Self {
        self.terms.add(term);
        self
    }

    pub fn clear_terms(mut self) -> Self {
        self.terms.clear();
        self
    }

    /// Query for the accumulated terms over `range`.
    pub fn query(&self, range: DateRange) -> SearchQuery {
        SearchQuery {
            terms: self.terms.clone(),
            range,
        }
    }

    /// Remember the latest result, replacing any earlier one.
    pub fn with_result(mut self, result: SearchResult) -> Self {
        self.last_result = Some(result);
        self
    }

    pub fn clear_result(mut self) -> Self {
        self.last_result = None;
        self
    }
}
