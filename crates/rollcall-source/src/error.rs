//! Error types for record sources

use thiserror::Error;

/// Errors that can occur while fetching records
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid endpoint URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the server
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
