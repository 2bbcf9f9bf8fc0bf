//! Pagination module
//!
//! Offset pagination over OData `$skip`/`$top`.
//!
//! # Overview
//!
//! The paginator decides the window (`$skip`, `$top`) of each page request
//! and, once the page has been read, whether another page follows. A page
//! that returns fewer records than requested ends the sequence; a
//! caller-supplied total caps it.

mod types;

pub use types::{NextPage, OffsetPaginator, PageWindow, PaginationState, StopReason};

#[cfg(test)]
mod tests;
