//! Configuration for the focus telemetry agent.

use crate::core::DEFAULT_DELIMITER;
use reqwest::Url;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Environment variable holding the bearer token.
pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";

/// Environment variable holding the report endpoint.
pub const API_URL_VAR: &str = "MY_API_URL";

/// Main configuration for the agent.
///
/// Loaded once at startup and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Bearer token sent with every report
    #[serde(serialize_with = "redact")]
    pub auth_token: String,

    /// Endpoint receiving the reports
    pub api_url: String,

    /// Time between two samples
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,

    /// Number of ticks per report
    pub batch_ticks: u32,

    /// Pause after a failed cycle
    #[serde(with = "duration_serde")]
    pub retry_backoff: Duration,

    /// Upper bound for one report request
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,

    /// Delimiter separating document and application in window titles
    pub title_delimiter: char,
}

impl Config {
    /// Create a configuration with default tuning.
    pub fn new(auth_token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            api_url: api_url.into(),
            tick_interval: Duration::from_secs(1),
            batch_ticks: 60,
            retry_backoff: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            title_delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_token = required(&lookup, AUTH_TOKEN_VAR)?;
        let api_url = required(&lookup, API_URL_VAR)?;

        let config = Self::new(auth_token, api_url);
        config.validate()?;
        Ok(config)
    }

    /// Check the values that cannot be fixed at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing(AUTH_TOKEN_VAR));
        }

        let url = Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.api_url,
                url.scheme()
            )));
        }

        if self.batch_ticks == 0 {
            return Err(ConfigError::Invalid(
                "batch_ticks must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn redact<S>(token: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let shown = if token.is_empty() { "" } else { "********" };
    shown.serialize(serializer)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    Missing(&'static str),
    /// The report endpoint is not a usable URL
    InvalidUrl(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{name} is not set"),
            ConfigError::InvalidUrl(e) => write!(f, "Invalid report URL {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration.
mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_tuning() {
        let config = Config::new("token", "https://example.com/ingest");
        assert_eq!(config.tick_interval, Duration::from_secs(1));
        assert_eq!(config.batch_ticks, 60);
        assert_eq!(config.retry_backoff, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.title_delimiter, '-');
    }

    #[test]
    fn test_token_is_passed_through_unmodified() {
        let config = Config::from_lookup(lookup_from(&[
            ("AUTH_TOKEN", " secret "),
            ("MY_API_URL", "https://example.com/ingest"),
        ]))
        .unwrap();
        assert_eq!(config.auth_token, " secret ");
        assert_eq!(config.api_url, "https://example.com/ingest");
    }

    #[test]
    fn test_missing_variables() {
        let err = Config::from_lookup(lookup_from(&[("MY_API_URL", "https://example.com")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("AUTH_TOKEN"));

        let err = Config::from_lookup(lookup_from(&[("AUTH_TOKEN", "t")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MY_API_URL"));

        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_TOKEN", "   "),
            ("MY_API_URL", "https://example.com"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "AUTH_TOKEN is not set");
    }

    #[test]
    fn test_invalid_url() {
        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_TOKEN", "t"),
            ("MY_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));

        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_TOKEN", "t"),
            ("MY_API_URL", "ftp://example.com/upload"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_zero_batch_rejected() {
        let mut config = Config::new("t", "http://127.0.0.1:8080/");
        config.batch_ticks = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_serialized_token_is_redacted() {
        let config = Config::new("super-secret", "https://example.com/ingest");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("********"));
        assert!(json.contains("\"batch_ticks\":60"));
        assert!(json.contains("\"retry_backoff\":5.0"));
    }
}
