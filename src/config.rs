//! Client configuration
//!
//! Base URL, request timeout, and retry policy for the remote auth client.
//! Values come from the builder, from the `AUTHKIT_API_URL` environment
//! variable, or from a TOML file.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::remote::RetryPolicy;

/// Default server base URL, ending at the API root
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Connect/read/write timeout observed in the production configuration
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "AUTHKIT_API_URL";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::disabled(),
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ConfigBuilder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let mut builder = Config::builder();
        if let Some(base_url) = file.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = file.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(retry) = file.retry {
            builder = builder.retry(RetryPolicy::new(
                retry.max_attempts,
                Duration::from_millis(retry.backoff_base_ms),
                Duration::from_millis(retry.backoff_max_ms),
            ));
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Full URL for an endpoint path relative to the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
}

impl ConfigBuilder {
    /// Set the server base URL (must end at the API root, e.g. `…/api`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the connect and total request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry policy for transient transport failures
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = Config::default();
        let base_url = self.base_url.unwrap_or(defaults.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        Ok(Config {
            base_url,
            timeout: self.timeout.unwrap_or(defaults.timeout),
            retry: self.retry.unwrap_or(defaults.retry),
        })
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    retry: Option<FileRetryConfig>,
}

#[derive(Debug, Deserialize)]
struct FileRetryConfig {
    max_attempts: u32,
    backoff_base_ms: u64,
    backoff_max_ms: u64,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to construct HTTP client: {0}")]
    Client(String),
}
