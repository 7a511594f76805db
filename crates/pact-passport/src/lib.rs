//! Event-sourced passport scoring (§4.6): the deterministic v4 score
//! algorithm, the `requirePassport` gate, the v1 pure delta form, and
//! order-independent recompute over a signer's transcript history.

mod delta;
mod recompute;
mod require;
mod score;

pub use delta::{compute_delta, TranscriptOutcome};
pub use recompute::{recompute, RecomputeEntry};
pub use require::{require_passport, PassportReason, RequirePassportResult};
pub use score::{compute_score, Factor, Factors, PassportScoreResult, ScoreBreakdown};
