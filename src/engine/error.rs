//! Execution engine error types

use thiserror::Error;

/// Errors that prevent a document from executing at all
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Document is not valid query syntax
    #[error("Syntax error: {0}")]
    Parse(String),

    /// Valid syntax the engine does not execute (mutations, variables, fragments)
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
