//! Error types for metadata lookups

use thiserror::Error;

/// Error type for metadata operations
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The path exists in the protocol but has no value on this instance
    #[error("metadata not found: {0}")]
    NotFound(String),

    /// Transport failure talking to the metadata server
    #[error("metadata request for {path} failed")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status other than 404
    #[error("metadata server returned {status} for {path}")]
    Status { path: String, status: u16 },

    /// The value could not be parsed into the expected type
    #[error("invalid value {value:?} at {path}: {reason}")]
    InvalidValue {
        path: String,
        value: String,
        reason: String,
    },

    /// Path is not part of the metadata tree
    #[error("invalid metadata path: {0}")]
    InvalidPath(String),

    /// Snapshot (de)serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error reading a snapshot or binding the snapshot server
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetadataError::NotFound(_))
    }
}

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;
