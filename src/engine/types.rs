//! Engine types
//!
//! Fetch requests, results, and statistics for the paged fetcher.

use crate::error::Result;
use crate::output::Table;
use crate::query::QueryOptions;
use crate::types::Record;
use std::time::Duration;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 5000;

/// A complete paged read of one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Resource path relative to the service root, e.g. `MASTER_DATA_API_SRV/LOCATION`
    pub resource: String,
    /// Query options sent on every page; `$skip`/`$top` are overridden per page
    pub options: QueryOptions,
    /// Records requested per page
    pub page_size: u32,
    /// Stop once this many records have been requested
    pub total_records: Option<u32>,
}

impl FetchRequest {
    /// Create a request for a resource with the default page size
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            options: QueryOptions::default(),
            page_size: DEFAULT_PAGE_SIZE,
            total_records: None,
        }
    }

    /// Set query options
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Cap the number of records requested
    #[must_use]
    pub fn with_total_records(mut self, total: Option<u32>) -> Self {
        self.total_records = total;
        self
    }
}

/// Statistics from a fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Page requests issued
    pub pages_fetched: u32,
    /// Records received
    pub records_fetched: usize,
    /// Wall-clock time
    pub duration: Duration,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page and its records
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records;
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Records of one resource, in server order
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// Resource the records came from
    pub resource: String,
    /// Records, page after page
    pub records: Vec<Record>,
    /// Fetch statistics
    pub stats: FetchStats,
}

impl FetchResult {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records were returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the result, keeping only the records
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Assemble the records into a table
    pub fn to_table(&self, strict: bool) -> Result<Table> {
        Table::from_records(&self.records, strict)
    }
}
