//! Error types.
//!
//! Two failure kinds matter to callers: [`GeoError::NoMatch`] (the grammar
//! could not consume the required span) and dictionary loading failures.
//! [`TypeMismatch`] is internal control flow for the productions and never
//! escapes [`crate::parse_whole`] or [`crate::scan`].

use std::path::PathBuf;

use thiserror::Error;

use crate::GeoLevel;

#[derive(Debug, Error)]
pub enum GeoError {
    /// The grammar could not consume the whole input.
    #[error("no geographic reference spans the whole input {input:?} (consumed {consumed} bytes)")]
    NoMatch { input: String, consumed: usize },

    /// A match attempt ran out of its production-step budget.
    #[error("step limit of {limit} production attempts exceeded")]
    StepLimitExceeded { limit: usize },

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// A type token that does not belong to the vocabulary being normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type {token:?} does not belong to the {level} vocabulary")]
pub struct TypeMismatch {
    pub level: GeoLevel,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
