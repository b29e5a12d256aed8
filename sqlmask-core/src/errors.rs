//! errors.rs - Custom error types for the sqlmask-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `sqlmask-core` library.
///
/// `InvalidTerm` is the only kind the matching engine itself can raise. The
/// catalog kinds (`DuplicateTerm`, `TermNotFound`) belong to term maintenance
/// and are never produced while sanitizing text.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SqlMaskError {
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    #[error("Word/Phrase already exists: {0}")]
    DuplicateTerm(String),

    #[error("No term found with ID {0}")]
    TermNotFound(u64),

    #[error("Failed to compile matcher for term '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Failed to (de)serialize term data: {0}")]
    Serialization(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl From<serde_json::Error> for SqlMaskError {
    fn from(err: serde_json::Error) -> Self {
        SqlMaskError::Serialization(err.to_string())
    }
}
