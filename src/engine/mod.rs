//! Execution engine module
//!
//! The paged read loop.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PageSource` - Anything that can return the records of one page
//! - `PagedFetcher` - Requests consecutive `$skip`/`$top` windows until the
//!   server runs dry or the requested total is reached
//! - `FetchRequest` / `FetchResult` / `FetchStats`
//!
//! Pages are requested one after another: each request is issued only once
//! the previous page has been parsed, because whether there is a next page
//! depends on the size of the current one.

mod types;

pub use types::{FetchRequest, FetchResult, FetchStats, DEFAULT_PAGE_SIZE};

use crate::error::{Result, ResultExt};
use crate::pagination::{NextPage, OffsetPaginator, PaginationState};
use crate::query::PageRequest;
use crate::types::Record;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// A source of pages, typically an OData service
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issue one request and return the records of that page
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>> {
        (**self).fetch_page(request).await
    }
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Record>> {
        (**self).fetch_page(request).await
    }
}

/// Paged fetcher for reading a whole resource
pub struct PagedFetcher<S> {
    source: S,
}

impl<S: PageSource> PagedFetcher<S> {
    /// Create a new fetcher over a page source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read every page of a resource and concatenate the records.
    ///
    /// Fails as a whole if any page fails; records from earlier pages are
    /// discarded.
    #[tracing::instrument(
        name = "fetch_all",
        skip(self, request),
        fields(
            resource = %request.resource,
            page_size = request.page_size,
            total_records = ?request.total_records,
        )
    )]
    pub async fn fetch_all(&self, request: &FetchRequest) -> Result<FetchResult> {
        let start = Instant::now();
        let paginator = OffsetPaginator::new(request.page_size, request.total_records)
            .map_err(|e| e.in_resource(&request.resource))?;

        let mut state = PaginationState::new();
        let mut stats = FetchStats::new();
        let mut records = Vec::new();

        while let Some(window) = paginator.next_window(&state) {
            let page_number = state.pages + 1;
            let page = PageRequest::new(
                request.resource.clone(),
                request.options.window(window.skip, window.top),
            );

            debug!(
                page = page_number,
                skip = window.skip,
                top = window.top,
                "Requesting page"
            );

            let page_records = match self.source.fetch_page(&page).await {
                Ok(records) => records,
                Err(e) => {
                    error!(
                        page = page_number,
                        skip = window.skip,
                        error = %e,
                        "Page request failed"
                    );
                    return Err(e.in_resource(format!(
                        "{} (page {page_number}, $skip={})",
                        request.resource, window.skip
                    )));
                }
            };

            let returned = page_records.len();
            stats.add_page(returned);
            records.extend(page_records);

            debug!(page = page_number, records = returned, "Page received");

            if let NextPage::Done(reason) = paginator.process_page(window, returned, &mut state) {
                debug!(?reason, "Pagination finished");
                break;
            }
        }

        stats.duration = start.elapsed();

        info!(
            pages = stats.pages_fetched,
            records = stats.records_fetched,
            duration_ms = stats.duration_ms(),
            "Fetch complete"
        );

        Ok(FetchResult {
            resource: request.resource.clone(),
            records,
            stats,
        })
    }

    /// Issue a single, unpaged request
    #[tracing::instrument(name = "fetch_once", skip(self, request), fields(resource = %request.resource))]
    pub async fn fetch_once(&self, request: &PageRequest) -> Result<Vec<Record>> {
        let records = self
            .source
            .fetch_page(request)
            .await
            .inspect_err(|e| error!(error = %e, "Request failed"))
            .with_resource(&request.resource)?;
        debug!(records = records.len(), "Response received");
        Ok(records)
    }
}

#[cfg(test)]
mod tests;
