//! Analytics client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-success HTTP status
    Transport,
    /// Response was not the expected JSON shape
    MalformedResponse,
    /// Well-formed response with nothing in it
    EmptyResult,
    /// Client could not be configured
    Config,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid JSON in response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Malformed response: `{field}` {reason}")]
    MalformedResponse { field: String, reason: String },
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Config(_) => ErrorKind::Config,
            ClientError::Http { .. } | ClientError::Network(_) => ErrorKind::Transport,
            ClientError::InvalidJson(_) | ClientError::MalformedResponse { .. } => {
                ErrorKind::MalformedResponse
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let http = ClientError::Http {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(http.kind(), ErrorKind::Transport);

        let malformed = ClientError::malformed("trends[0].id", "is missing");
        assert_eq!(malformed.kind(), ErrorKind::MalformedResponse);
        assert_eq!(
            malformed.to_string(),
            "Malformed response: `trends[0].id` is missing"
        );
    }
}
