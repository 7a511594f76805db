//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
