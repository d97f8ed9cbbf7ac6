//! Error types for ftsmachine.
//!
//! Every fallible operation returns [`Result`], whose error type is
//! [`FtsError`]. The variants follow the life of a table: a broken row source
//! surfaces as [`FtsError::Connection`], an invalid schema as
//! [`FtsError::Schema`], a bad bulk load as [`FtsError::Load`] and a rejected
//! search as [`FtsError::Query`].
//!
//! # Examples
//!
//! ```
//! use ftsmachine::error::{FtsError, Result};
//!
//! fn check_limit(limit: usize) -> Result<usize> {
//!     if limit == 0 {
//!         return Err(FtsError::query("limit must be greater than zero"));
//!     }
//!     Ok(limit)
//! }
//!
//! assert!(check_limit(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ftsmachine operations.
///
/// Schema and load errors leave the affected table unusable and it has to be
/// rebuilt. Query errors are local to a single search call.
#[derive(Error, Debug)]
pub enum FtsError {
    /// The row source could not be opened or broke while being read.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid column set or tokenizer configuration.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Rows could not be assembled into a named-column table.
    #[error("Build error: {0}")]
    Build(String),

    /// Bulk load failed (arity mismatch, reseal attempt, aborted stream).
    #[error("Load error: {0}")]
    Load(String),

    /// Search rejected (unknown column, malformed term, invalid limit).
    #[error("Query error: {0}")]
    Query(String),

    /// I/O errors (schema files and the like)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with FtsError.
pub type Result<T> = std::result::Result<T, FtsError>;

impl FtsError {
    /// Create a new connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        FtsError::Connection(msg.into())
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        FtsError::Schema(msg.into())
    }

    /// Create a new build error.
    pub fn build<S: Into<String>>(msg: S) -> Self {
        FtsError::Build(msg.into())
    }

    /// Create a new load error.
    pub fn load<S: Into<String>>(msg: S) -> Self {
        FtsError::Load(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        FtsError::Query(msg.into())
    }

    /// Whether this error came from the row source rather than the index.
    pub fn is_connection(&self) -> bool {
        matches!(self, FtsError::Connection(_))
    }
}

impl From<rusqlite::Error> for FtsError {
    fn from(error: rusqlite::Error) -> Self {
        FtsError::Connection(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FtsError::schema("duplicate column 'title'");
        assert_eq!(error.to_string(), "Schema error: duplicate column 'title'");

        let error = FtsError::load("table already sealed");
        assert_eq!(error.to_string(), "Load error: table already sealed");

        let error = FtsError::query("unknown column 'foo'");
        assert_eq!(error.to_string(), "Query error: unknown column 'foo'");
    }

    #[test]
    fn test_sqlite_error_is_connection_error() {
        let error = FtsError::from(rusqlite::Error::InvalidQuery);
        assert!(error.is_connection());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        match FtsError::from(io_error) {
            FtsError::Io(_) => {}
            other => panic!("Expected IO error variant, got {other:?}"),
        }
    }
}
