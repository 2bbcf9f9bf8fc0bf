//! IBP service clients
//!
//! # Overview
//!
//! - `ODataService` - One OData service root; the HTTP-backed `PageSource`
//! - `IbpClient` - Master data, key figures and telemetry of a tenant
//! - `LogViewService` - Job and application logs

mod ibp;
mod log_view;
mod odata;

pub use ibp::{
    IbpClient, KeyFigureQuery, KeyFigureService, MasterDataQuery, TelemetryView,
    IBP_SERVICE_PATH, MASTER_DATA_SERVICE, TELEMETRY_SELECT, TELEMETRY_SERVICE_PATH,
    TELEMETRY_TOP,
};
pub use log_view::{
    LogViewService, IBP_LOGS, JOB_INFO_SET, LOG_ATTRIBUTES, LOG_HEADERS, LOG_VIEW_SERVICE,
};
pub use odata::ODataService;
