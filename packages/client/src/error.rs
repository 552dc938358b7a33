//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for settings API operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    /// Server-side rejection of an image upload. The message is whatever the
    /// server reported and is surfaced to the operator verbatim.
    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("API error ({0}): {1}")]
    Api(StatusCode, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
