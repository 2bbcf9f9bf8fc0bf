// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ibp-odata
//!
//! A client for the OData services of an SAP Integrated Business Planning
//! (IBP) tenant.
//!
//! ## Features
//!
//! - **Master data**: paged reads of any master data type from `MASTER_DATA_API_SRV`
//! - **Key figures**: paged reads from `PLANNING_DATA_API_SRV` or `EXTRACT_ODATA_SRV`
//! - **Telemetry**: Excel add-in activity from the metering-activity service
//! - **Job logs**: entity sets of `LOG_VIEW_SRV` with CSRF handling
//! - **Tables**: records assembled into columns and exported as CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ibp_odata::{ClientConfig, IbpClient, MasterDataQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("my-tenant-api.scmibp.ondemand.com", "COMM_USER", "secret");
//!     let client = IbpClient::new(config)?;
//!
//!     let query = MasterDataQuery::new("LOCATION", "LOCID,LOCDESCR")
//!         .planning_area("SAPIBP1")
//!         .total_records(10_000);
//!     let result = client.master_data(&query).await?;
//!
//!     let table = result.to_table(false)?;
//!     println!("{} rows, columns {:?}", table.len(), table.columns());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  IbpClient: master_data / key_figures / telemetry / log_view │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │  Output   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Basic    │ GET       │ $top / $skip  │ Atom XML  │ Table     │
//! │ CSRF     │ Rate Limit│ Short page    │ JSON      │ CSV       │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Basic authentication and CSRF tokens
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// OData query options
pub mod query;

/// Offset pagination
pub mod pagination;

/// Response decoders (Atom XML, JSON)
pub mod decode;

/// Paged fetch engine
pub mod engine;

/// Tables and CSV export
pub mod output;

/// Client configuration
pub mod config;

/// IBP services
pub mod service;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use engine::{FetchRequest, FetchResult, PageSource, PagedFetcher};
pub use output::{CsvExporter, ExportConfig, Table};
pub use query::QueryOptions;
pub use service::{
    IbpClient, KeyFigureQuery, KeyFigureService, LogViewService, MasterDataQuery, TelemetryView,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
