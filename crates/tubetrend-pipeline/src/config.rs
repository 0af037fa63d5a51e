//! Pipeline configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What to do when a video's detail lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFailurePolicy {
    /// Drop the video's rows, log a warning, keep going
    #[default]
    Skip,
    /// Fail the whole search
    Abort,
}

impl fmt::Display for DetailFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailFailurePolicy::Skip => write!(f, "skip"),
            DetailFailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for DetailFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "drop" => Ok(DetailFailurePolicy::Skip),
            "abort" => Ok(DetailFailurePolicy::Abort),
            other => Err(format!("unknown detail failure policy: {}", other)),
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Handling of failed detail lookups
    pub detail_failure_policy: DetailFailurePolicy,
    /// Gap between the two samples of the availability probe
    pub probe_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detail_failure_policy: DetailFailurePolicy::Skip,
            probe_interval: Duration::from_secs(10),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            detail_failure_policy: std::env::var("TUBETREND_DETAIL_FAILURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            probe_interval: Duration::from_secs(
                std::env::var("TUBETREND_PROBE_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
