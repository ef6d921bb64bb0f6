//! Internal error types for folio-reqwest.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for folio-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for folio-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body was not the expected JSON.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Server answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    /// The API URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The API URL parsed but cannot serve as a base.
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

impl From<Error> for folio_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                let message = if e.is_timeout() {
                    "Request timed out".to_owned()
                } else if e.is_connect() {
                    "Connection failed".to_owned()
                } else {
                    e.to_string()
                };

                folio_core::Error::fetch_failure()
                    .with_message(message)
                    .with_source(e)
            }
            Error::Serde(e) => folio_core::Error::fetch_failure()
                .with_message("Response is not valid JSON")
                .with_source(e),
            Error::Status { status, url } if status == StatusCode::NOT_FOUND => {
                folio_core::Error::not_found().with_context(url)
            }
            Error::Status { status, url } => folio_core::Error::fetch_failure()
                .with_message(format!("Unexpected status {status}"))
                .with_context(url),
            Error::Url(e) => folio_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            Error::InvalidApiUrl(url) => folio_core::Error::configuration()
                .with_message("API URL must be an http or https URL")
                .with_context(url),
        }
    }
}
