//! CLI commands and argument parsing

use crate::query::{InlineCount, QueryOptions};
use crate::service::TelemetryView;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Read master data, key figures and logs from SAP IBP
#[derive(Parser, Debug)]
#[command(name = "ibp-odata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true, env = "IBP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Tenant host, overrides the config file and IBP_HOST
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Communication user, overrides the config file and IBP_USERNAME
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// CSV file to write (csv format only)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Fail when records do not all share the same fields
    #[arg(long, global = true)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a master data type
    MasterData {
        /// Master data type, e.g. LOCATION
        master_data_type: String,

        /// Comma-separated fields to return
        #[arg(long)]
        select: String,

        /// PlanningAreaID header
        #[arg(long)]
        planning_area: Option<String>,

        /// VersionID header
        #[arg(long)]
        version_id: Option<String>,

        /// VersionName header
        #[arg(long)]
        version_name: Option<String>,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Read key figures of a planning area
    KeyFigures {
        /// Planning area, e.g. SAPIBP1
        planning_area: String,

        /// Comma-separated master data attributes
        #[arg(long)]
        master_data: String,

        /// Comma-separated key figures
        #[arg(long)]
        key_figures: String,

        /// 1 = PLANNING_DATA_API_SRV, 2 = EXTRACT_ODATA_SRV
        #[arg(long, default_value = "1")]
        module: u8,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Read Excel add-in activity (PlanningView or AddInLogon)
    Telemetry {
        /// Telemetry view
        view: TelemetryView,
    },

    /// Job and application logs
    JobLogs {
        #[command(subcommand)]
        command: JobLogCommands,
    },
}

/// Log view subcommands
#[derive(Subcommand, Debug)]
pub enum JobLogCommands {
    /// List entity sets
    EntitySets,

    /// Read an entity set, e.g. JobInfoSet
    Read {
        /// Entity set name
        entity_set: String,

        /// Comma-separated fields to return
        #[arg(long)]
        select: Option<String>,

        /// Maximum number of records
        #[arg(long)]
        top: Option<u32>,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// OData query options shared by the read commands
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// $filter expression
    #[arg(long)]
    pub filter: Option<String>,

    /// $orderby expression
    #[arg(long)]
    pub orderby: Option<String>,

    /// $expand navigation properties
    #[arg(long)]
    pub expand: Option<String>,

    /// $search expression
    #[arg(long)]
    pub search: Option<String>,

    /// Ask for $inlinecount=allpages
    #[arg(long)]
    pub inlinecount: bool,
}

impl QueryArgs {
    /// Query options carrying the given arguments
    pub fn to_options(&self) -> QueryOptions {
        QueryOptions {
            filter: self.filter.clone(),
            orderby: self.orderby.clone(),
            expand: self.expand.clone(),
            search: self.search.clone(),
            inlinecount: self.inlinecount.then_some(InlineCount::AllPages),
            ..QueryOptions::default()
        }
    }
}

/// Paging arguments
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Records per page (config default when unset)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop after this many records
    #[arg(long)]
    pub total_records: Option<u32>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable table
    Pretty,
    /// CSV file
    Csv,
}
