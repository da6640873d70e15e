//! Country-data collaborator.
//!
//! [`CountrySource`] is the seam the submitter talks to; [`RestCountriesClient`]
//! is the HTTP implementation against `GET {base}/name/{query}`.

use crate::error::{ConfigError, LookupError};
use crate::query::SearchQuery;
use crate::record::CountryRecord;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Longest slice of an error body kept in [`LookupError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

/// Something that can look countries up by (normalized) name.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn lookup_by_name(&self, query: &SearchQuery) -> Result<Vec<CountryRecord>, LookupError>;
}

/// REST Countries API client.
///
/// No timeout and no retries unless a timeout is configured; one call is one
/// request.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: Client,
    base: Url,
}

impl RestCountriesClient {
    /// Client for the public API at [`DEFAULT_BASE_URL`].
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_url(DEFAULT_BASE_URL, None)
    }

    pub fn with_base_url(base: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(builder.build()?, base)
    }

    /// Use a preconfigured `reqwest` client.
    pub fn with_client(http: Client, base: &str) -> Result<Self, ConfigError> {
        Ok(Self { http, base: parse_base_url(base)? })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/name/{query}`, with the query percent-encoded as one segment.
    pub fn name_url(&self, query: &SearchQuery) -> Result<Url, LookupError> {
        let mut url = self.base.clone();
        {
            let mut segments =
                url.path_segments_mut().map_err(|_| LookupError::InvalidBaseUrl(self.base.to_string()))?;
            segments.pop_if_empty().push("name").push(query.as_str());
        }
        Ok(url)
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn lookup_by_name(&self, query: &SearchQuery) -> Result<Vec<CountryRecord>, LookupError> {
        let url = self.name_url(query)?;
        debug!(%url, "fetching country records");

        let response = self.http.get(url).header(ACCEPT, "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body: body.chars().take(ERROR_BODY_LIMIT).collect() });
        }

        let body = response.bytes().await?;
        let records: Vec<CountryRecord> = serde_json::from_slice(&body)?;
        debug!(count = records.len(), "decoded country records");
        Ok(records)
    }
}

pub(crate) fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::Url { value: value.to_string(), source })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase(value.to_string()));
    }
    Ok(url)
}
