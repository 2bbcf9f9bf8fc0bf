//! OData query module
//!
//! Typed system query options (`$select`, `$filter`, `$top`, ...) and the
//! page request built from them.
//!
//! # Overview
//!
//! Every option is an explicit named field. Options left unset are not sent
//! at all, so the server applies its own defaults.

mod options;

pub use options::{InlineCount, PageRequest, QueryOptions};
