//! Client configuration
//!
//! Connection settings for an IBP tenant, loaded from a YAML (or JSON) file
//! and overridable from the environment:
//!
//! ```yaml
//! host: my-tenant-api.scmibp.ondemand.com
//! username: COMM_USER
//! password: secret
//! http:
//!   timeout_seconds: 60
//!   rate_limit:
//!     requests_per_second: 5
//! paging:
//!   page_size: 5000
//! export:
//!   dir: /tmp
//!   file_name: output.csv
//! ```

use crate::auth::AuthConfig;
use crate::engine::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::output::ExportConfig;
use crate::types::OptionStringExt;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `host`
pub const ENV_HOST: &str = "IBP_HOST";
/// Environment variable overriding `username`
pub const ENV_USERNAME: &str = "IBP_USERNAME";
/// Environment variable overriding `password`
pub const ENV_PASSWORD: &str = "IBP_PASSWORD";

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Connection settings for one IBP tenant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Tenant host name, e.g. `my-tenant-api.scmibp.ondemand.com`.
    /// An explicit `http://` or `https://` prefix is kept as-is.
    #[serde(default)]
    pub host: String,

    /// Communication user
    #[serde(default)]
    pub username: String,

    /// Communication user password
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Paging settings
    #[serde(default)]
    pub paging: PagingSettings,

    /// CSV export settings
    #[serde(default)]
    pub export: ExportConfig,
}

fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.map(SecretString::from))
}

impl ClientConfig {
    /// Create a config from explicit credentials
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: Some(SecretString::from(password.into())),
            ..Self::default()
        }
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config document. JSON documents are accepted too.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Override fields from `IBP_HOST`, `IBP_USERNAME` and `IBP_PASSWORD`
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup
    #[must_use]
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).none_if_empty();

        if let Some(host) = var(ENV_HOST) {
            self.host = host;
        }
        if let Some(username) = var(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = var(ENV_PASSWORD) {
            self.password = Some(SecretString::from(password));
        }
        self
    }

    /// Check that the config can be used to connect
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::missing_field("host"));
        }
        url::Url::parse(&self.origin())?;
        if self.username.is_empty() {
            return Err(Error::missing_field("username"));
        }
        if self
            .password
            .as_ref()
            .map_or(true, |p| p.expose_secret().is_empty())
        {
            return Err(Error::missing_field("password"));
        }
        if self.paging.page_size == 0 {
            return Err(Error::invalid_value(
                "paging.page_size",
                "must be greater than zero",
            ));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Scheme and host, without a trailing slash
    pub fn origin(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        }
    }

    /// Basic credentials for the communication user
    pub fn auth_config(&self) -> AuthConfig {
        match &self.password {
            Some(password) => AuthConfig::Basic {
                username: self.username.clone(),
                password: password.clone(),
            },
            None => AuthConfig::None,
        }
    }

    /// HTTP client settings rooted at `base_url`
    pub fn http_client_config(&self, base_url: impl Into<String>) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.http.timeout_seconds));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder = match &self.http.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

// ============================================================================
// Paging Settings
// ============================================================================

/// Paging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagingSettings {
    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
