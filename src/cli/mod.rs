//! CLI module
//!
//! Command-line interface for reading IBP data.
//!
//! # Commands
//!
//! - `master-data` - Read a master data type
//! - `key-figures` - Read key figures of a planning area
//! - `telemetry` - Read Excel add-in activity
//! - `job-logs entity-sets` - List log view entity sets
//! - `job-logs read` - Read a log view entity set

mod commands;
mod runner;

pub use commands::{Cli, Commands, JobLogCommands, OutputFormat, PagingArgs, QueryArgs};
pub use runner::{write_records, Runner};
