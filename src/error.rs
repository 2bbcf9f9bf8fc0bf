//! Error types for ibp-odata
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors fall into a handful of coarse kinds (see [`ErrorKind`]) so callers
//! can tell "the server could not be reached" apart from "the server sent a
//! body we could not read" without matching every variant.

use thiserror::Error;

/// The main error type for ibp-odata
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse config file: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Authentication rejected by the server (HTTP 401); check username and password")]
    Unauthorized,

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Parse Errors
    // ============================================================================
    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("JSON parsing error: {message}")]
    JsonParse { message: String },

    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    // ============================================================================
    // Assembly Errors
    // ============================================================================
    #[error("Failed to assemble records into a table: {message}")]
    Assembly { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    // ============================================================================
    // Context
    // ============================================================================
    #[error("{resource}: {source}")]
    Resource {
        resource: String,
        #[source]
        source: Box<Error>,
    },
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing configuration
    Config,
    /// Network or HTTP failure (unreachable, non-2xx, auth rejected)
    Transport,
    /// The server answered but the body had an unexpected shape
    Parse,
    /// Records could not be combined into the target table
    Assembly,
    /// Local file system failure (export)
    Io,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create a JSON parse error
    pub fn json(message: impl Into<String>) -> Self {
        Self::JsonParse {
            message: message.into(),
        }
    }

    /// Create a record extraction error
    pub fn extraction(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an assembly error
    pub fn assembly(message: impl Into<String>) -> Self {
        Self::Assembly {
            message: message.into(),
        }
    }

    /// Wrap this error with the resource it occurred on
    #[must_use]
    pub fn in_resource(self, resource: impl Into<String>) -> Self {
        Self::Resource {
            resource: resource.into(),
            source: Box::new(self),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::InvalidUrl(_) => ErrorKind::Config,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Unauthorized | Error::Timeout { .. } => {
                ErrorKind::Transport
            }
            Error::XmlParse { .. } | Error::JsonParse { .. } | Error::RecordExtraction { .. } => {
                ErrorKind::Parse
            }
            Error::Assembly { .. } => ErrorKind::Assembly,
            Error::Io(_) | Error::Csv(_) => ErrorKind::Io,
            Error::Resource { source, .. } => source.kind(),
        }
    }

    /// The innermost error, with all resource context removed
    pub fn root(&self) -> &Error {
        match self {
            Error::Resource { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Check if this is a parse failure
    pub fn is_parse(&self) -> bool {
        self.kind() == ErrorKind::Parse
    }
}

/// Result type alias for ibp-odata
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding resource context to errors
pub trait ResultExt<T> {
    /// Attach the resource name to an error
    fn with_resource(self, resource: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_resource(self, resource: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().in_resource(resource))
    }
}
