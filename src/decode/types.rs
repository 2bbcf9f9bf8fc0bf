//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use super::decoders::{AtomFeedDecoder, JsonDecoder};
use crate::error::Result;
use crate::types::Record;
use serde::{Deserialize, Serialize};

/// Format of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// Atom XML feed (OData v2 default)
    #[default]
    Xml,
    /// JSON document holding an array of objects
    Json,
}

impl DecoderFormat {
    /// Value for the `Accept` header
    pub fn accept(self) -> &'static str {
        match self {
            DecoderFormat::Xml => "application/atom+xml",
            DecoderFormat::Json => "application/json",
        }
    }
}

/// Configuration for decoding responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Response format
    pub format: DecoderFormat,
    /// Dotted path to the record array (JSON only). `None` means the
    /// document itself is the array.
    pub record_path: Option<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::xml()
    }
}

impl DecoderConfig {
    /// Create an Atom XML decoder config
    pub fn xml() -> Self {
        Self {
            format: DecoderFormat::Xml,
            record_path: None,
        }
    }

    /// Create a JSON decoder config reading the `value` array (OData v4)
    pub fn json() -> Self {
        Self::json_with_path("value")
    }

    /// Create a JSON decoder config with a record path
    pub fn json_with_path(path: impl Into<String>) -> Self {
        Self {
            format: DecoderFormat::Json,
            record_path: Some(path.into()),
        }
    }

    /// Build the decoder for this configuration
    pub fn decoder(&self) -> Box<dyn RecordDecoder> {
        match self.format {
            DecoderFormat::Xml => Box::new(AtomFeedDecoder::new()),
            DecoderFormat::Json => match &self.record_path {
                Some(path) => Box::new(JsonDecoder::with_path(path.clone())),
                None => Box::new(JsonDecoder::new()),
            },
        }
    }
}

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into an ordered list of records
    fn decode(&self, body: &[u8]) -> Result<Vec<Record>>;
}
