//! Response decoder module
//!
//! Supports: Atom XML feeds (OData v2) and JSON record arrays
//!
//! # Overview
//!
//! A decoder turns one page body into an ordered list of flat records.
//! XML entries are flattened from `entry/content/m:properties`; JSON pages
//! pass their objects through unchanged.

mod decoders;
mod types;

pub use decoders::{AtomFeedDecoder, JsonDecoder};
pub use types::{DecoderConfig, DecoderFormat, RecordDecoder};

use crate::error::Result;
use crate::types::Record;

/// Parse one page body into records using the given configuration
pub fn parse_page(body: &[u8], config: &DecoderConfig) -> Result<Vec<Record>> {
    config.decoder().decode(body)
}
