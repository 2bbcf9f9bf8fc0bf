//! Generic OData service access

use crate::auth::CSRF_HEADER;
use crate::decode::{self, DecoderConfig};
use crate::engine::PageSource;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::query::PageRequest;
use crate::types::{JsonValue, Record};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// One OData service root and the headers every request to it carries
#[derive(Debug, Clone)]
pub struct ODataService {
    http: Arc<HttpClient>,
    root: String,
    decoder: DecoderConfig,
    headers: Vec<(String, String)>,
    csrf: bool,
}

impl ODataService {
    /// Create a service rooted at `root`, e.g. `https://host/sap/opu/odata/IBP/`
    pub fn new(http: Arc<HttpClient>, root: impl Into<String>) -> Self {
        Self {
            http,
            root: root.into(),
            decoder: DecoderConfig::default(),
            headers: Vec::new(),
            csrf: false,
        }
    }

    /// Set how page bodies are decoded
    #[must_use]
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a header only when a value is present
    #[must_use]
    pub fn with_header_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_header(key, value),
            None => self,
        }
    }

    /// Send a CSRF token, fetched once from `$metadata`, with every request
    #[must_use]
    pub fn with_csrf(mut self, enabled: bool) -> Self {
        self.csrf = enabled;
        self
    }

    /// Service root URL
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Decoder configuration
    pub fn decoder(&self) -> &DecoderConfig {
        &self.decoder
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Absolute URL of a resource below the service root
    pub fn url(&self, resource: &str) -> String {
        let root = self.root.trim_end_matches('/');
        let resource = resource.trim_start_matches('/');
        if resource.is_empty() {
            root.to_string()
        } else {
            format!("{root}/{resource}")
        }
    }

    /// Names of the entity sets listed in the service document
    #[tracing::instrument(skip(self), fields(root = %self.root))]
    pub async fn entity_sets(&self) -> Result<Vec<String>> {
        let config = self
            .base_request()
            .header(CSRF_HEADER, "fetch")
            .header("Accept", "application/json");
        let body = self.http.get_bytes(&self.url(""), config).await?;

        let document: JsonValue = serde_json::from_slice(&body)
            .map_err(|e| Error::json(format!("Failed to parse service document: {e}")))?;

        let sets = document
            .pointer("/d/EntitySets")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::extraction("d.EntitySets", "not found in service document"))?;

        sets.iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::extraction("d.EntitySets", format!("not a name: {v}")))
            })
            .collect()
    }

    /// `Accept` follows the decoder unless a fixed header overrides it
    fn base_request(&self) -> RequestConfig {
        let config = RequestConfig::new().header("Accept", self.decoder.format.accept());
        self.headers
            .iter()
            .fold(config, |config, (k, v)| config.header(k, v))
    }

    async fn csrf_token(&self) -> Result<Option<String>> {
        if !self.csrf {
            return Ok(None);
        }
        match self.http.authenticator() {
            Some(auth) => auth.csrf_token(&self.url("$metadata")).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PageSource for ODataService {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>> {
        let token = self.csrf_token().await?;
        let config = self
            .base_request()
            .header_opt(CSRF_HEADER, token)
            .queries(request.options.to_query_pairs());

        let body = self.http.get_bytes(&self.url(&request.resource), config).await?;
        let records = decode::parse_page(&body, &self.decoder)?;

        debug!(
            resource = %request.resource,
            bytes = body.len(),
            records = records.len(),
            "Decoded page"
        );
        Ok(records)
    }
}
