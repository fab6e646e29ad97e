//! Error types for Outseta API operations.

use thiserror::Error;

/// Errors that can occur during Outseta API operations.
#[derive(Debug, Error)]
pub enum OutsetaError {
    /// Configuration is missing or incomplete.
    #[error("Outseta configuration required: {0}")]
    ConfigMissing(String),

    /// The client builder was given invalid or incomplete settings.
    #[error("Failed to build Outseta client: {0}")]
    ClientBuild(String),

    /// A required argument was blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Page parameters are out of range.
    #[error("Invalid page request: {0}")]
    InvalidPage(String),

    /// Header name or value cannot be sent over HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Outseta answered with a non-success status.
    #[error("Outseta API error: {message}")]
    ApiError {
        message: String,
        url: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl OutsetaError {
    /// HTTP status code attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether Outseta reported that the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for Outseta operations.
pub type Result<T> = core::result::Result<T, OutsetaError>;

/// Reject blank identifiers before any request is made.
pub(crate) fn require_id(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OutsetaError::InvalidArgument(format!(
            "{what} cannot be null or blank."
        )));
    }
    Ok(())
}
