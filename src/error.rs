use thiserror::Error;

/// Why a lookup against the country-data API failed.
///
/// All of these collapse to a single user-facing message in
/// [`ResultState::Error`](crate::ResultState::Error); the detail is kept for
/// logging.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("base URL {0} cannot carry path segments")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{value}': {source}")]
    Url { value: String, source: url::ParseError },

    #[error("base URL '{0}' cannot carry path segments")]
    CannotBeABase(String),

    #[error("invalid timeout '{0}' (expected a number of seconds)")]
    InvalidTimeout(String),

    #[error("invalid time format '{0}'")]
    InvalidTimeFormat(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
