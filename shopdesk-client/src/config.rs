//! Client configuration.

use reqwest::Client;
use shopdesk_core::{ApiError, Result};
use std::time::Duration;
use url::Url;

/// Default bound on a single refresh call. A hung refresh would otherwise
/// block every queued request indefinitely.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API origin, e.g. `https://api.example.com`. No trailing slash.
    pub base_url: String,
    /// Origin this client is served from, if known.
    pub origin: Option<String>,
    /// Origins allowed to call the API without authentication.
    ///
    /// This is a deployment policy gate in front of the client; the
    /// refresh protocol never consults it.
    pub trusted_origins: Vec<String>,
    /// Request timeout applied to the HTTP client.
    pub timeout: Option<Duration>,
    /// Bound on a single refresh call; `None` disables the bound.
    pub refresh_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config pointing at the given API origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            origin: None,
            trusted_origins: Vec::new(),
            timeout: None,
            refresh_timeout: Some(DEFAULT_REFRESH_TIMEOUT),
        }
    }

    /// Set the origin this client is served from.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the trusted origins list.
    #[must_use]
    pub fn with_trusted_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound a single refresh call, or disable the bound with `None`.
    #[must_use]
    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Load from environment variables.
    ///
    /// Looks for:
    /// - `SHOPDESK_API_URL` (required)
    /// - `SHOPDESK_ORIGIN`
    /// - `SHOPDESK_TRUSTED_ORIGINS` (comma-separated)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SHOPDESK_API_URL")
            .map_err(|_| ApiError::config("SHOPDESK_API_URL is not set"))?;
        Url::parse(&base_url)
            .map_err(|err| ApiError::config(format!("invalid SHOPDESK_API_URL: {err}")))?;

        let mut config = Self::new(base_url);
        if let Ok(origin) = std::env::var("SHOPDESK_ORIGIN") {
            config.origin = Some(origin);
        }
        if let Ok(list) = std::env::var("SHOPDESK_TRUSTED_ORIGINS") {
            config.trusted_origins = list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(ToOwned::to_owned)
                .collect();
        }
        Ok(config)
    }

    /// Whether the configured origin is on the trusted list.
    pub fn is_trusted_origin(&self) -> bool {
        match &self.origin {
            Some(origin) => self.trusted_origins.iter().any(|o| o == origin),
            None => false,
        }
    }

    /// Build an HTTP client with this config.
    pub fn build_http_client(&self) -> Client {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://api.example.com")
            .with_origin("https://kiosk.example.com")
            .with_trusted_origins(["https://kiosk.example.com"])
            .with_timeout(Duration::from_secs(10));

        assert!(config.is_trusted_origin());
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.refresh_timeout, Some(DEFAULT_REFRESH_TIMEOUT));
    }

    #[test]
    fn test_unknown_origin_is_not_trusted() {
        let config = ClientConfig::new("https://api.example.com")
            .with_trusted_origins(["https://kiosk.example.com"]);
        assert!(!config.is_trusted_origin());

        let config = config.with_origin("https://elsewhere.example.com");
        assert!(!config.is_trusted_origin());
    }

    #[test]
    fn test_from_env() {
        std::env::remove_var("SHOPDESK_API_URL");
        assert!(ClientConfig::from_env().is_err());

        std::env::set_var("SHOPDESK_API_URL", "https://api.example.com");
        std::env::set_var("SHOPDESK_TRUSTED_ORIGINS", "https://a.example.com, https://b.example.com");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(
            config.trusted_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );

        std::env::remove_var("SHOPDESK_API_URL");
        std::env::remove_var("SHOPDESK_TRUSTED_ORIGINS");
    }
}
