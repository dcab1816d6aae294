//! Client configuration
//!
//! [`ClientConfig`] is the request context shared by every outgoing call: the
//! bearer credential, the API base URL and the transport knobs. It is built
//! once (from the builder, the environment or a YAML file) and then shared
//! read-only, usually behind an `Arc`.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const API_KEY_ENV: &str = "API_KEY";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "FRONT_API_BASE_URL";

/// Default Front API base URL
pub const DEFAULT_BASE_URL: &str = "https://api2.frontapp.com";

/// Client-side pacing, in the per-minute terms Front states its limits in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// Requests allowed per minute
    pub requests_per_minute: u32,
    /// Requests that may go out back to back before pacing starts
    #[serde(default = "default_burst")]
    pub burst: u32,
}

fn default_burst() -> u32 {
    1
}

impl ThrottleConfig {
    /// Pace to `requests_per_minute` with no burst allowance
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            burst: default_burst(),
        }
    }

    /// Allow `burst` requests back to back
    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = burst;
        self
    }
}

/// Immutable configuration attached to every request
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent in the `Authorization` header
    pub api_key: String,
    /// Base URL that relative paths are resolved against
    pub base_url: String,
    /// Per-request timeout; exceeding it is a transport error
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Give up after this many consecutive 429 responses (`None` = never)
    pub max_rate_limit_retries: Option<u32>,
    /// Optional client-side pacing applied before every attempt
    pub throttle: Option<ThrottleConfig>,
    /// Extra headers for all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("front-export/{}", env!("CARGO_PKG_VERSION")),
            max_rate_limit_retries: None,
            throttle: None,
            default_headers: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .field("throttle", &self.throttle)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from `API_KEY` and the optional `FRONT_API_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| Error::missing_field(API_KEY_ENV))?;
        let mut builder = Self::builder().api_key(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Load a config from a YAML file
    ///
    /// A missing `api_key` in the file falls back to the `API_KEY` variable.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        ConfigFile::load(path)?.into_config()
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        file.into_config()
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Resolve a path against the base URL; absolute URLs pass through
    pub fn resolve_url(&self, path: &str) -> Result<String> {
        match url::Url::parse(path) {
            Ok(url) => return Ok(url.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => {}
            Err(e) => return Err(e.into()),
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(url::Url::parse(&format!("{base}/{path}"))?.to_string())
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API token
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Cap the number of consecutive rate-limited retries
    pub fn max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.config.max_rate_limit_retries = Some(retries);
        self
    }

    /// Enable client-side pacing
    pub fn throttle(mut self, config: ThrottleConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        if self.config.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        url::Url::parse(&self.config.base_url)?;
        if self.config.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(self.config)
    }
}

// ============================================================================
// YAML file format
// ============================================================================

/// On-disk representation of [`ClientConfig`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// API token (falls back to `API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent string
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Retry ceiling for 429 responses
    #[serde(default)]
    pub max_rate_limit_retries: Option<u32>,
    /// Client-side pacing
    #[serde(default)]
    pub throttle: Option<ThrottleConfig>,
    /// Extra headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ConfigFile {
    /// Read a config file without validating it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Convert into a validated [`ClientConfig`]
    pub fn into_config(self) -> Result<ClientConfig> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var(API_KEY_ENV).map_err(|_| Error::missing_field("api_key"))?,
        };

        let mut builder = ClientConfig::builder().api_key(api_key);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(retries) = self.max_rate_limit_retries {
            builder = builder.max_rate_limit_retries(retries);
        }
        if let Some(throttle) = self.throttle {
            builder = builder.throttle(throttle);
        }
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
