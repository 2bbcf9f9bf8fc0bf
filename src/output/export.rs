//! CSV file export

use super::table::Table;
use crate::error::Result;
use crate::types::Record;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used when none is configured
pub const DEFAULT_FILE_NAME: &str = "output.csv";

/// Where exported files go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory; `~/Desktop` (or the working directory) when unset
    pub dir: Option<PathBuf>,
    /// File name inside the directory
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a new export config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set target directory
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set file name
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Full path of the export file
    pub fn resolve_path(&self) -> PathBuf {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => default_dir(dirs::desktop_dir(), dirs::home_dir()),
        };
        dir.join(&self.file_name)
    }
}

/// The platform Desktop, else `Desktop` under the home directory, else the
/// working directory. Only existing directories are used.
fn default_dir(desktop: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    desktop
        .into_iter()
        .chain(home.map(|h| h.join("Desktop")))
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes record sets to CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    config: ExportConfig,
}

impl CsvExporter {
    /// Create an exporter
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Get the export config
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export records to the configured path, returning that path
    pub fn export(&self, records: &[Record]) -> Result<PathBuf> {
        let path = self.config.resolve_path();
        self.export_to(records, &path)?;
        Ok(path)
    }

    /// Export records to an explicit path. Returns the number of rows written.
    pub fn export_to(&self, records: &[Record], path: &Path) -> Result<usize> {
        let table = Table::from_records(records, false)?;
        let file = File::create(path)?;
        table.write_csv(BufWriter::new(file))?;

        info!(path = %path.display(), rows = table.len(), "Exported CSV");
        Ok(table.len())
    }
}
