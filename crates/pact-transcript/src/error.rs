//! Machine-readable integrity error types (§4.3 step 6).

use serde::{Deserialize, Serialize};

/// A single integrity failure found while verifying a transcript. The
/// verdict's `errors` list may hold several of these; any one makes the
/// transcript `INVALID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityError {
    pub error_type: IntegrityErrorType,
    pub message: String,
}

impl IntegrityError {
    pub fn new(error_type: IntegrityErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityErrorType {
    VersionMismatch,
    NonContiguousRounds,
    BrokenHashChain,
    RoundHashMismatch,
    InvalidSignature,
    FailureHashMismatch,
    UnknownTerminality,
    FinalHashMismatch,
}
