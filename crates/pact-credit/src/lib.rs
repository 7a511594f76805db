//! Credit risk engine (§4.7): tier terms, kill-switches, downgrades, and
//! exposure-cap enforcement layered on top of passport scores.

mod exposure;
mod terms;

pub use exposure::{apply_credit_event, can_extend_credit, CreditDecision, CreditEventOutcome};
pub use terms::{base_tier, compute_credit_terms, DisputeLossRecord, FailureRecord};
