//! Authenticator implementation
//!
//! Applies credentials to requests and fetches/caches CSRF tokens.

use super::types::{AuthConfig, CsrfToken};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Header used to request and carry CSRF tokens
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached CSRF token
    csrf_token: Arc<RwLock<Option<CsrfToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            csrf_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// The auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,
            AuthConfig::Basic { username, password } => {
                req.basic_auth(username, Some(password.expose_secret()))
            }
        }
    }

    /// Get a CSRF token for the service whose `$metadata` lives at `metadata_url`.
    ///
    /// The first successful token is cached for the lifetime of the
    /// authenticator. A service that answers without issuing a token yields
    /// `Ok(None)`; transport failures are returned as errors.
    pub async fn csrf_token(&self, metadata_url: &str) -> Result<Option<String>> {
        {
            let cached = self.csrf_token.read().await;
            if let Some(token) = cached.as_ref() {
                return Ok(Some(token.value.clone()));
            }
        }

        let mut cached = self.csrf_token.write().await;

        // Another task may have fetched it while we waited for the lock
        if let Some(token) = cached.as_ref() {
            return Ok(Some(token.value.clone()));
        }

        let fetched = self.fetch_csrf_token(metadata_url).await?;
        if let Some(value) = &fetched {
            *cached = Some(CsrfToken::new(value.clone()));
        }
        Ok(fetched)
    }

    /// Drop the cached CSRF token
    pub async fn invalidate_csrf_token(&self) {
        *self.csrf_token.write().await = None;
    }

    async fn fetch_csrf_token(&self, metadata_url: &str) -> Result<Option<String>> {
        let req = self
            .http_client
            .get(metadata_url)
            .header(CSRF_HEADER, "fetch")
            .header("Accept", "*/*");
        let response = self.apply(req).send().await.map_err(Error::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                url = metadata_url,
                "CSRF token request was not accepted"
            );
            return Ok(None);
        }

        let token = response
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("required"));

        debug!(issued = token.is_some(), "Fetched CSRF token");
        Ok(token)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
