//! Evidence bundle error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvidenceError {
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hashing error: {0}")]
    Hash(#[from] pact_types::PactError),
}

pub type Result<T> = std::result::Result<T, EvidenceError>;
