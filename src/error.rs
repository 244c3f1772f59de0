//! Error types for the presage library.
//!
//! All fallible operations return [`Result`], which uses [`PresageError`] as
//! its error type. Lookups for absent data are not errors; they return
//! `Option` or empty results instead.

use thiserror::Error;

/// The main error type for presage operations.
#[derive(Error, Debug)]
pub enum PresageError {
    /// Analysis-related errors (invalid subword patterns, splitter setup).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors.
    #[error("Index error: {0}")]
    Index(String),

    /// Query-related errors.
    #[error("Query error: {0}")]
    Query(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`PresageError`].
pub type Result<T> = std::result::Result<T, PresageError>;

impl PresageError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        PresageError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        PresageError::Index(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        PresageError::Query(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PresageError::Other(msg.into())
    }
}
