use reqwest::StatusCode;
use thiserror::Error;

use crate::models::chain::ChainError;

/// Failures below the engine boundary
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(String),
    #[error("invalid option chain: {0}")]
    Chain(#[from] ChainError),
}

impl FetchError {
    /// Structural chain violations will not change on retry
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::Chain(_))
    }

    /// The exchange rejected our cookies
    pub fn is_session_rejected(&self) -> bool {
        matches!(
            self,
            FetchError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}
