use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Invalid header '{header}'.")]
    InvalidHeader { header: String },
    #[error("Request timed out after {timeout:?}: {source}")]
    Timeout {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },
    #[error("Connection failed: {source}")]
    Connect {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed: {source}")]
    RequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    ReadBody {
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Classifies a transport failure the way it is reported to callers.
    #[must_use]
    pub fn from_transport(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            HttpError::Timeout { timeout, source }
        } else if source.is_connect() {
            HttpError::Connect { source }
        } else {
            HttpError::RequestFailed { source }
        }
    }
}
