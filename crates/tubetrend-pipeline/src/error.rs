//! Pipeline error types.

use thiserror::Error;
use tubetrend_client::{ClientError, ErrorKind};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Analytics API error: {0}")]
    Client(#[from] ClientError),

    #[error("No results: {0}")]
    EmptyResult(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Client(e) => e.kind(),
            PipelineError::EmptyResult(_) => ErrorKind::EmptyResult,
            PipelineError::Config(_) => ErrorKind::Config,
        }
    }

    /// "No data" rather than "broken".
    pub fn is_empty_result(&self) -> bool {
        matches!(self, PipelineError::EmptyResult(_))
    }
}
