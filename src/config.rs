//! Runtime configuration.
//!
//! Defaults match the public API with no timeout. Environment variables
//! override the defaults; the CLI overrides both.

use crate::denylist::Denylist;
use crate::error::ConfigError;
use crate::source::{DEFAULT_BASE_URL, RestCountriesClient, parse_base_url};
use crate::submitter::QuerySubmitter;
use crate::timezone::{LocalizeOptions, is_valid_format};
use std::time::Duration;

pub const ENV_BASE_URL: &str = "COUNTRY_LOOKUP_BASE_URL";
/// Comma-separated; replaces the default denylist when set.
pub const ENV_BLOCKED: &str = "COUNTRY_LOOKUP_BLOCKED";
pub const ENV_TIMEOUT_SECS: &str = "COUNTRY_LOOKUP_TIMEOUT_SECS";
pub const ENV_TIME_FORMAT: &str = "COUNTRY_LOOKUP_TIME_FORMAT";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub denylist: Denylist,
    pub timeout: Option<Duration>,
    pub localize: LocalizeOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            denylist: Denylist::default(),
            timeout: None,
            localize: LocalizeOptions::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base) = get(ENV_BASE_URL) {
            config.set_base_url(&base)?;
        }
        if let Some(blocked) = get(ENV_BLOCKED) {
            config.denylist = Denylist::from_terms(blocked.split(','));
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            config.timeout = Some(parse_timeout(&timeout)?);
        }
        if let Some(format) = get(ENV_TIME_FORMAT) {
            config.set_time_format(&format)?;
        }

        Ok(config)
    }

    pub fn set_base_url(&mut self, value: &str) -> Result<(), ConfigError> {
        parse_base_url(value)?;
        self.base_url = value.to_string();
        Ok(())
    }

    pub fn set_time_format(&mut self, format: &str) -> Result<(), ConfigError> {
        if !is_valid_format(format) {
            return Err(ConfigError::InvalidTimeFormat(format.to_string()));
        }
        self.localize.format = format.to_string();
        Ok(())
    }

    pub fn client(&self) -> Result<RestCountriesClient, ConfigError> {
        RestCountriesClient::with_base_url(&self.base_url, self.timeout)
    }

    pub fn submitter(&self) -> Result<QuerySubmitter<RestCountriesClient>, ConfigError> {
        Ok(QuerySubmitter::new(self.client()?, self.denylist.clone()))
    }
}

/// Whole or fractional seconds, strictly positive.
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidTimeout(value.to_string());
    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::DEFAULT_TIME_FORMAT;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.denylist, Denylist::default());
        assert_eq!(config.timeout, None);
        assert_eq!(config.localize.format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn environment_overrides() {
        let config = config_from(&[
            (ENV_BASE_URL, "http://localhost:8080/v3.1"),
            (ENV_BLOCKED, " Atlantis, El Dorado ,,"),
            (ENV_TIMEOUT_SECS, "2.5"),
            (ENV_TIME_FORMAT, "%H:%M"),
        ])
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v3.1");
        assert_eq!(config.denylist.terms().collect::<Vec<_>>(), vec!["atlantis", "el dorado"]);
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.localize.format, "%H:%M");
    }

    #[test]
    fn empty_blocked_variable_clears_denylist() {
        let config = config_from(&[(ENV_BLOCKED, "")]).unwrap();
        assert!(config.denylist.is_empty());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(config_from(&[(ENV_BASE_URL, "nope")]), Err(ConfigError::Url { .. })));
        assert!(matches!(config_from(&[(ENV_TIMEOUT_SECS, "soon")]), Err(ConfigError::InvalidTimeout(_))));
        assert!(matches!(config_from(&[(ENV_TIMEOUT_SECS, "0")]), Err(ConfigError::InvalidTimeout(_))));
        assert!(matches!(config_from(&[(ENV_TIME_FORMAT, "%Q")]), Err(ConfigError::InvalidTimeFormat(_))));
        assert!(matches!(config_from(&[(ENV_TIME_FORMAT, "%H:%M %z")]), Err(ConfigError::InvalidTimeFormat(_))));
    }

    #[test]
    fn rejected_format_leaves_previous_in_place() {
        let mut config = Config::default();
        config.set_time_format("%H:%M").unwrap();

        assert!(config.set_time_format("%H:%M %:z").is_err());
        assert_eq!(config.localize.format, "%H:%M");
    }

    #[test]
    fn builds_submitter_with_configured_denylist() {
        let mut config = Config::default();
        config.denylist = Denylist::from_terms(["atlantis"]);

        let submitter = config.submitter().unwrap();
        assert!(submitter.denylist().contains("Atlantis"));
        assert_eq!(submitter.source().base_url().as_str(), "https://restcountries.com/v3.1");
    }
}
