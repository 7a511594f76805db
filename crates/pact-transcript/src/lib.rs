//! PACT Transcript - transcript integrity verification (C3, §4.3).

mod error;
mod verify;

pub use error::{IntegrityError, IntegrityErrorType};
pub use verify::{verify_transcript, IntegrityStatus, IntegrityVerdict};
