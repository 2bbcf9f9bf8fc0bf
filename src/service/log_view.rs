//! Job log service (`LOG_VIEW_SRV`)

use super::ibp::IBP_SERVICE_PATH;
use super::odata::ODataService;
use crate::config::ClientConfig;
use crate::engine::PagedFetcher;
use crate::error::Result;
use crate::http::HttpClient;
use crate::query::{PageRequest, QueryOptions};
use crate::types::Record;
use std::sync::Arc;

/// Log view service name
pub const LOG_VIEW_SERVICE: &str = "LOG_VIEW_SRV";

/// Application job information
pub const JOB_INFO_SET: &str = "JobInfoSet";
/// Application log entries
pub const IBP_LOGS: &str = "xIBPxC_IBPLOGS_TBL";
/// Application log attributes
pub const LOG_ATTRIBUTES: &str = "xIBPxC_IBP_LOG_ATT";
/// Application log headers
pub const LOG_HEADERS: &str = "xIbpxC_log_hdr";

/// Reads job and application logs.
///
/// Owns its HTTP client so the CSRF token fetched from `$metadata` is cached
/// for this service only.
#[derive(Debug, Clone)]
pub struct LogViewService {
    service: ODataService,
}

impl LogViewService {
    /// Create the service for a tenant
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let root = format!("{}{IBP_SERVICE_PATH}{LOG_VIEW_SERVICE}", config.origin());
        let http = HttpClient::with_auth(config.http_client_config(&root), config.auth_config())?;
        Ok(Self::with_client(Arc::new(http), root))
    }

    /// Create the service over an existing client
    pub fn with_client(http: Arc<HttpClient>, root: impl Into<String>) -> Self {
        let service = ODataService::new(http, root)
            .with_csrf(true)
            .with_header("DataServiceVersion", "2.0")
            .with_header("Accept", "*/*");
        Self { service }
    }

    /// Service root URL
    pub fn root(&self) -> &str {
        self.service.root()
    }

    /// Names of all entity sets the service offers
    pub async fn entity_sets(&self) -> Result<Vec<String>> {
        self.service.entity_sets().await
    }

    /// Read an entity set
    #[tracing::instrument(skip(self, options))]
    pub async fn entity_data(&self, entity_set: &str, options: &QueryOptions) -> Result<Vec<Record>> {
        let request = PageRequest::new(entity_set, options.clone());
        PagedFetcher::new(&self.service).fetch_once(&request).await
    }

    /// Read `JobInfoSet`
    pub async fn job_info_set(&self, options: &QueryOptions) -> Result<Vec<Record>> {
        self.entity_data(JOB_INFO_SET, options).await
    }

    /// Read `xIBPxC_IBPLOGS_TBL`
    pub async fn ibp_logs(&self, options: &QueryOptions) -> Result<Vec<Record>> {
        self.entity_data(IBP_LOGS, options).await
    }

    /// Read `xIBPxC_IBP_LOG_ATT`
    pub async fn log_attributes(&self, options: &QueryOptions) -> Result<Vec<Record>> {
        self.entity_data(LOG_ATTRIBUTES, options).await
    }

    /// Read `xIbpxC_log_hdr`
    pub async fn log_headers(&self, options: &QueryOptions) -> Result<Vec<Record>> {
        self.entity_data(LOG_HEADERS, options).await
    }
}
