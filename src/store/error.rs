//! Record store error types
//!
//! Only raised while building the store at startup. Queries never fail.

use thiserror::Error;

/// Errors that can occur while loading the record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record file is not a valid JSON array of people
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Two records share an id
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    /// A record has a negative age
    #[error("Invalid age {age} for record {id}")]
    InvalidAge { id: String, age: i64 },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
