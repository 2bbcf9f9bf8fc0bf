//! IBP planning services: master data, key figures and telemetry

use super::log_view::LogViewService;
use super::odata::ODataService;
use crate::auth::CSRF_HEADER;
use crate::config::ClientConfig;
use crate::decode::DecoderConfig;
use crate::engine::{FetchRequest, FetchResult, PagedFetcher};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::query::{PageRequest, QueryOptions};
use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Path of the OData v2 IBP services below the host
pub const IBP_SERVICE_PATH: &str = "/sap/opu/odata/IBP/";

/// Path of the metering-activity (telemetry) OData v4 service below the host
pub const TELEMETRY_SERVICE_PATH: &str =
    "/sap/opu/odata4/ibp/api_meteringactivity/srvd_a2x/ibp/api_meteringactivity/0001/";

/// Master data service name
pub const MASTER_DATA_SERVICE: &str = "MASTER_DATA_API_SRV";

/// Fields selected from the telemetry views
pub const TELEMETRY_SELECT: &str = "ActivityID,PlanningAreaID";

/// Records requested from a telemetry view
pub const TELEMETRY_TOP: u32 = 50;

// ============================================================================
// Request types
// ============================================================================

/// Service that key figures are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFigureService {
    /// `PLANNING_DATA_API_SRV`
    #[default]
    PlanningData,
    /// `EXTRACT_ODATA_SRV`
    Extract,
}

impl KeyFigureService {
    /// Service name below the IBP service path
    pub fn service_name(self) -> &'static str {
        match self {
            KeyFigureService::PlanningData => "PLANNING_DATA_API_SRV",
            KeyFigureService::Extract => "EXTRACT_ODATA_SRV",
        }
    }

    /// Look up a service by its module number (1 or 2)
    pub fn from_module(module: u8) -> Result<Self> {
        match module {
            1 => Ok(KeyFigureService::PlanningData),
            2 => Ok(KeyFigureService::Extract),
            other => Err(Error::invalid_value(
                "module",
                format!("expected 1 or 2, got {other}"),
            )),
        }
    }
}

/// Telemetry view of the metering-activity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryView {
    /// Excel add-in planning view activity
    PlanningView,
    /// Excel add-in logon activity
    AddInLogon,
}

impl TelemetryView {
    /// Entity set of the view
    pub fn entity_set(self) -> &'static str {
        match self {
            TelemetryView::PlanningView => "MtrgActyExcelAddInPlanningView",
            TelemetryView::AddInLogon => "MtrgActyExcelAddInLogon",
        }
    }
}

impl std::str::FromStr for TelemetryView {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PlanningView" => Ok(TelemetryView::PlanningView),
            "AddInLogon" => Ok(TelemetryView::AddInLogon),
            other => Err(Error::invalid_value(
                "view",
                format!("unknown telemetry view '{other}', expected PlanningView or AddInLogon"),
            )),
        }
    }
}

/// A paged master data read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterDataQuery {
    /// Master data type, e.g. `LOCATION`
    pub master_data_type: String,
    /// Comma-separated fields to return
    pub select: String,
    /// `PlanningAreaID` header
    pub planning_area_id: Option<String>,
    /// `VersionID` header
    pub version_id: Option<String>,
    /// `VersionName` header
    pub version_name: Option<String>,
    /// Further query options (`$filter`, `$orderby`, ...)
    pub options: QueryOptions,
    /// Records per page; the configured page size when unset
    pub page_size: Option<u32>,
    /// Stop after this many records
    pub total_records: Option<u32>,
}

impl MasterDataQuery {
    /// Create a query for a master data type
    pub fn new(master_data_type: impl Into<String>, select: impl Into<String>) -> Self {
        Self {
            master_data_type: master_data_type.into(),
            select: select.into(),
            ..Self::default()
        }
    }

    /// Set the planning area header
    #[must_use]
    pub fn planning_area(mut self, id: impl Into<String>) -> Self {
        self.planning_area_id = Some(id.into());
        self
    }

    /// Set the version headers
    #[must_use]
    pub fn version(mut self, id: impl Into<String>, name: Option<String>) -> Self {
        self.version_id = Some(id.into());
        self.version_name = name;
        self
    }

    /// Set query options
    #[must_use]
    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Set page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Cap the number of records
    #[must_use]
    pub fn total_records(mut self, total: u32) -> Self {
        self.total_records = Some(total);
        self
    }

    /// Resource path below the IBP service path
    pub fn resource(&self) -> String {
        format!("{MASTER_DATA_SERVICE}/{}", self.master_data_type)
    }
}

/// A paged key figure read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFigureQuery {
    /// Planning area, e.g. `SAPIBP1`
    pub planning_area_id: String,
    /// Comma-separated master data attributes
    pub master_data: String,
    /// Comma-separated key figures
    pub key_figures: String,
    /// Service to read from
    pub service: KeyFigureService,
    /// Further query options (`$filter`, `$orderby`, ...)
    pub options: QueryOptions,
    /// Records per page; the configured page size when unset
    pub page_size: Option<u32>,
    /// Stop after this many records
    pub total_records: Option<u32>,
}

impl KeyFigureQuery {
    /// Create a query for a planning area
    pub fn new(
        planning_area_id: impl Into<String>,
        master_data: impl Into<String>,
        key_figures: impl Into<String>,
    ) -> Self {
        Self {
            planning_area_id: planning_area_id.into(),
            master_data: master_data.into(),
            key_figures: key_figures.into(),
            ..Self::default()
        }
    }

    /// Set the service
    #[must_use]
    pub fn service(mut self, service: KeyFigureService) -> Self {
        self.service = service;
        self
    }

    /// Set query options
    #[must_use]
    pub fn options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Set page size
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Cap the number of records
    #[must_use]
    pub fn total_records(mut self, total: u32) -> Self {
        self.total_records = Some(total);
        self
    }

    /// `$select`: master data attributes followed by key figures
    pub fn select(&self) -> String {
        format!("{},{}", self.master_data, self.key_figures)
    }

    /// Resource path below the IBP service path
    pub fn resource(&self) -> String {
        format!("{}/{}", self.service.service_name(), self.planning_area_id)
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for one IBP tenant
#[derive(Debug, Clone)]
pub struct IbpClient {
    config: ClientConfig,
    http: Arc<HttpClient>,
    base_url: String,
}

impl IbpClient {
    /// Create a client from validated settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = format!("{}{IBP_SERVICE_PATH}", config.origin());
        let http = HttpClient::with_auth(config.http_client_config(&base_url), config.auth_config())?;

        Ok(Self {
            config,
            http: Arc::new(http),
            base_url,
        })
    }

    /// Client settings
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Root of the OData v2 IBP services, e.g. `https://host/sap/opu/odata/IBP/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root of the telemetry service
    pub fn telemetry_url(&self) -> String {
        format!("{}{TELEMETRY_SERVICE_PATH}", self.config.origin())
    }

    /// The IBP service root as a page source
    pub fn service(&self) -> ODataService {
        ODataService::new(Arc::clone(&self.http), self.base_url.clone())
    }

    /// Read all records of a master data type
    #[tracing::instrument(
        skip(self, query),
        fields(
            master_data_type = %query.master_data_type,
            select = %query.select,
            total_records = ?query.total_records,
        )
    )]
    pub async fn master_data(&self, query: &MasterDataQuery) -> Result<FetchResult> {
        if query.master_data_type.is_empty() {
            return Err(Error::missing_field("master_data_type"));
        }
        if query.select.is_empty() {
            return Err(Error::missing_field("select"));
        }

        let service = self
            .service()
            .with_header_opt("PlanningAreaID", query.planning_area_id.clone())
            .with_header_opt("VersionID", query.version_id.clone())
            .with_header("MasterDataTypeID", query.master_data_type.clone())
            .with_header_opt("VersionName", query.version_name.clone());

        let request = FetchRequest::new(query.resource())
            .with_options(query.options.clone().select(query.select.clone()))
            .with_page_size(query.page_size.unwrap_or(self.config.paging.page_size))
            .with_total_records(query.total_records);

        PagedFetcher::new(service).fetch_all(&request).await
    }

    /// Read all key figure records of a planning area
    #[tracing::instrument(
        skip(self, query),
        fields(
            planning_area_id = %query.planning_area_id,
            service = query.service.service_name(),
            total_records = ?query.total_records,
        )
    )]
    pub async fn key_figures(&self, query: &KeyFigureQuery) -> Result<FetchResult> {
        if query.planning_area_id.is_empty() {
            return Err(Error::missing_field("planning_area_id"));
        }
        if query.master_data.is_empty() {
            return Err(Error::missing_field("master_data"));
        }
        if query.key_figures.is_empty() {
            return Err(Error::missing_field("key_figures"));
        }

        let service = self
            .service()
            .with_header(CSRF_HEADER, "fetch")
            .with_header("Content-Type", "application/json");

        let request = FetchRequest::new(query.resource())
            .with_options(query.options.clone().select(query.select()))
            .with_page_size(query.page_size.unwrap_or(self.config.paging.page_size))
            .with_total_records(query.total_records);

        PagedFetcher::new(service).fetch_all(&request).await
    }

    /// Read recent activity from a telemetry view
    #[tracing::instrument(skip(self))]
    pub async fn telemetry(&self, view: TelemetryView) -> Result<Vec<Record>> {
        let service = ODataService::new(Arc::clone(&self.http), self.telemetry_url())
            .with_decoder(DecoderConfig::json())
            .with_header("DataServiceVersion", "2.0");

        let request = PageRequest::new(
            view.entity_set(),
            QueryOptions::new()
                .select(TELEMETRY_SELECT)
                .top(TELEMETRY_TOP),
        );

        PagedFetcher::new(service).fetch_once(&request).await
    }

    /// Job log service of the same tenant
    pub fn log_view(&self) -> Result<LogViewService> {
        LogViewService::new(&self.config)
    }
}
