//! Error types for larder operations.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type LarderResult<T> = Result<T, LarderError>;

/// Errors surfaced by catalog loading and construction.
///
/// Query resolution itself is infallible: a query that matches nothing is a
/// normal `None` result, never an error.
#[derive(Debug, Error)]
pub enum LarderError {
    /// A required data source (catalog or stopword file) is absent.
    ///
    /// This is fatal at startup: no query can be served without an index.
    #[error("missing data source: {path}")]
    MissingSource { path: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

impl LarderError {
    /// Construct a `MissingSource` error for the given path.
    pub fn missing_source(path: impl Into<String>) -> Self {
        LarderError::MissingSource { path: path.into() }
    }
}
