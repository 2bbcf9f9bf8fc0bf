//! Pagination types
//!
//! Defines the offset paginator and the state it tracks across pages.

use crate::error::{Error, Result};

/// `$skip`/`$top` of one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Offset of the first record
    pub skip: u32,
    /// Number of records requested
    pub top: u32,
}

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page returned fewer records than requested
    ShortPage,
    /// The caller-supplied total has been requested
    TotalReached,
}

/// Result of processing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Another page should be requested
    Continue,
    /// No more pages
    Done(StopReason),
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Tracks pagination state during one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next page
    pub offset: u32,
    /// Pages processed so far
    pub pages: u32,
    /// Total records received so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u32) {
        self.offset = self.offset.saturating_add(amount);
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Offset-based pagination (`$skip`/`$top`)
///
/// Each page asks for `page_size` records, or fewer when a total is set and
/// less than a full page remains. The offset advances by the number of
/// records *requested*, never by the number received: a page returning
/// fewer than requested always ends pagination, so the two only differ on
/// the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Records requested per page
    pub page_size: u32,
    /// Upper bound on records requested overall
    pub total_records: Option<u32>,
}

impl OffsetPaginator {
    /// Create a new offset paginator. `page_size` must be positive.
    pub fn new(page_size: u32, total_records: Option<u32>) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than zero"));
        }
        Ok(Self {
            page_size,
            total_records,
        })
    }

    /// Window of the next page, or `None` when no request should be made
    pub fn next_window(&self, state: &PaginationState) -> Option<PageWindow> {
        if state.done {
            return None;
        }

        let top = match self.total_records {
            Some(total) if state.offset >= total => return None,
            Some(total) => self.page_size.min(total - state.offset),
            None => self.page_size,
        };

        Some(PageWindow {
            skip: state.offset,
            top,
        })
    }

    /// Record a received page and decide whether to continue
    pub fn process_page(
        &self,
        window: PageWindow,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.pages += 1;
        state.add_fetched(records_count as u64);

        if records_count < window.top as usize {
            state.mark_done();
            return NextPage::Done(StopReason::ShortPage);
        }

        state.add_offset(window.top);

        if let Some(total) = self.total_records {
            if state.offset >= total {
                state.mark_done();
                return NextPage::Done(StopReason::TotalReached);
            }
        }

        NextPage::Continue
    }
}
