//! Error types for the slice engine.
//!
//! Errors are split by where they arise: [`QueryError`] covers everything
//! detected while turning search parameters into criteria (before storage is
//! touched), and [`StorageError`] is whatever the repository port reports.
//! [`SliceError`] wraps both, and [`ErrorKind`] gives a flat tag for the
//! transport layer to map onto status codes.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The primary error type for slice queries.
#[derive(Error, Debug)]
pub enum SliceError {
    /// Criteria construction errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Repository port errors, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SliceError {
    /// Returns the tag used to classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SliceError::Query(e) => e.kind(),
            SliceError::Storage(e) => e.kind(),
        }
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SliceError::Query(_))
    }
}

/// Errors raised while building slice criteria.
///
/// All of these are detected synchronously, before any query runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The cursor could not be parsed into the entity key type.
    #[error("invalid pagination cursor: {cursor}")]
    InvalidCursor { cursor: String },

    /// The page size is zero, negative, or above the configured maximum.
    #[error("invalid page size {size}: must be between 1 and {max}")]
    InvalidPageSize { size: i64, max: usize },

    /// The page size is not a number at all.
    #[error("malformed page size: {value}")]
    MalformedPageSize { value: String },

    /// The search field is not part of the entity's enumeration.
    #[error("unsupported search field '{field}' (expected one of: {})", allowed.join(", "))]
    InvalidSearchField {
        field: String,
        allowed: Vec<&'static str>,
    },

    /// A filter value could not be parsed.
    #[error("invalid value '{value}' for filter '{filter}'")]
    InvalidFilter { filter: String, value: String },
}

impl QueryError {
    /// Returns the tag used to classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::InvalidCursor { .. } => ErrorKind::InvalidCursor,
            QueryError::InvalidPageSize { .. } | QueryError::MalformedPageSize { .. } => {
                ErrorKind::InvalidPageSize
            }
            QueryError::InvalidSearchField { .. } => ErrorKind::InvalidSearchField,
            QueryError::InvalidFilter { .. } => ErrorKind::InvalidFilter,
        }
    }
}

/// Errors reported by a repository port.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryFailed { message: String },

    /// A row with the same key already exists.
    #[error("duplicate key {key} in {table}")]
    DuplicateKey { table: &'static str, key: i64 },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Returns the tag used to classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Unavailable { .. } => ErrorKind::StorageUnavailable,
            _ => ErrorKind::StorageFailure,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Internal {
            backend_name: "seed".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Internal {
            backend_name: "seed".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Flat classification of every engine error.
///
/// Transport layers key their status mapping on this tag rather than on the
/// error types themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCursor,
    InvalidPageSize,
    InvalidSearchField,
    InvalidFilter,
    StorageUnavailable,
    StorageFailure,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCursor => "INVALID_CURSOR",
            ErrorKind::InvalidPageSize => "INVALID_PAGE_SIZE",
            ErrorKind::InvalidSearchField => "INVALID_SEARCH_FIELD",
            ErrorKind::InvalidFilter => "INVALID_FILTER",
            ErrorKind::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ErrorKind::StorageFailure => "STORAGE_FAILURE",
        }
    }

    /// Short human-readable title for this kind.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCursor => "Invalid cursor",
            ErrorKind::InvalidPageSize => "Invalid page size",
            ErrorKind::InvalidSearchField => "Invalid search field",
            ErrorKind::InvalidFilter => "Invalid filter",
            ErrorKind::StorageUnavailable => "Storage unavailable",
            ErrorKind::StorageFailure => "Storage failure",
        }
    }

    /// Returns true for kinds caused by caller input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidCursor
                | ErrorKind::InvalidPageSize
                | ErrorKind::InvalidSearchField
                | ErrorKind::InvalidFilter
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for slice queries.
pub type SliceQueryResult<T> = Result<T, SliceError>;
