//! Error types for the ccoindex library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`CcoError`] enum. Contract violations (mutating an optimized index,
//! ingesting a document without an identifier, passing a malformed query) are
//! reported as errors. Expected data skew, such as a document field that was
//! never registered or a query term the index has never seen, is logged and
//! skipped instead.
//!
//! # Examples
//!
//! ```
//! use ccoindex::error::{CcoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CcoError::invalid_config("k1 must be finite"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ccoindex operations.
#[derive(Error, Debug)]
pub enum CcoError {
    /// A mutating operation was attempted after the one-way optimize transition.
    #[error("Cannot modify an already-optimized index")]
    AlreadyOptimized,

    /// A document was ingested without an identifier.
    #[error("Document identifier is required")]
    MissingDocumentId,

    /// A document that cannot be converted from its external representation.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A query was not a mapping of field name to text or tokens.
    #[error("Invalid query shape: {0}")]
    InvalidQueryShape(String),

    /// Configuration values outside their valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted index that cannot be turned back into a score index.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors from the persistence layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with CcoError.
pub type Result<T> = std::result::Result<T, CcoError>;

impl CcoError {
    /// Create a new invalid query shape error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        CcoError::InvalidQueryShape(msg.into())
    }

    /// Create a new invalid document error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        CcoError::InvalidDocument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        CcoError::InvalidConfig(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CcoError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CcoError::invalid_query("expected an object");
        assert_eq!(error.to_string(), "Invalid query shape: expected an object");

        let error = CcoError::invalid_config("b out of range");
        assert_eq!(error.to_string(), "Invalid configuration: b out of range");

        let error = CcoError::serialization("bad key");
        assert_eq!(error.to_string(), "Serialization error: bad key");

        assert_eq!(
            CcoError::AlreadyOptimized.to_string(),
            "Cannot modify an already-optimized index"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let cco_error = CcoError::from(io_error);

        match cco_error {
            CcoError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
