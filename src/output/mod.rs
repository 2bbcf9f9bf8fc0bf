//! Output module
//!
//! Turns fetched records into tables and files.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Assembling records into a column-aligned `Table`
//! - Rendering tables as text
//! - Writing tables to CSV files

mod export;
mod table;

pub use export::{CsvExporter, ExportConfig, DEFAULT_FILE_NAME};
pub use table::Table;
