//! Errors the expense engine can return.
//!
//! The server maps each variant to an HTTP status, so the taxonomy here is
//! the single source of truth for failure semantics.

use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required field is missing or an input value is out of range.
    #[error("invalid input: {0}")]
    Validation(String),
    /// The caller's role does not allow the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// The resource does not exist, or exists but is not visible to the
    /// caller. Ownership mismatches deliberately look like missing records.
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("{0} already exists")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
