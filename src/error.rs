//! Fetch layer error types
//!
//! Every failure a request can end in. Load cycles convert these into
//! transient notices; nothing here is fatal to the view.

use thiserror::Error;

/// Errors returned by the analytics API fetch layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Request never produced a response (connect, timeout, DNS)
    #[error("Network error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Request could not be built (bad base URL, empty identifiers)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build an HTTP error from a status and whatever body text was readable
    ///
    /// An empty body falls back to `Request failed (<status>)`.
    pub fn from_status(status: u16, body: Option<String>) -> Self {
        let message = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| format!("Request failed ({})", status));
        ApiError::Http { status, message }
    }

    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), None)
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Result type for fetch operations
pub type ApiResult<T> = Result<T, ApiError>;
