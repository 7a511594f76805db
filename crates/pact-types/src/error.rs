//! Structural error type shared by codec and domain-shape checks.
//!
//! Per §7, these are data errors, not cryptographic ones: malformed input,
//! missing fields, version mismatches. They are always returned, never
//! thrown, and the core never attempts to silently repair them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PactError {
    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },

    #[error("malformed JSON: {message}")]
    MalformedJson { message: String },
}

pub type Result<T> = std::result::Result<T, PactError>;

impl From<serde_json::Error> for PactError {
    fn from(e: serde_json::Error) -> Self {
        PactError::MalformedJson {
            message: e.to_string(),
        }
    }
}
