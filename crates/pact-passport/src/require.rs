//! `requirePassport` reason codes (§4.6 step 12).

use crate::score::PassportScoreResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassportReason {
    InvalidMinScore,
    InvalidMinConfidence,
    InsufficientHistory,
    ScoreTooLow,
    RecentPolicyViolation,
    DisputeFlagged,
    LowConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequirePassportResult {
    pub pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PassportReason>,
}

fn fail(reason: PassportReason) -> RequirePassportResult {
    RequirePassportResult {
        pass: false,
        reason: Some(reason),
    }
}

/// Gate a passport against a minimum score (and optional minimum
/// confidence), returning the first reason in the fixed check order listed
/// in §4.6 step 12.
pub fn require_passport(
    result: &PassportScoreResult,
    min_score: f64,
    min_confidence: Option<f64>,
) -> RequirePassportResult {
    if !(0.0..=100.0).contains(&min_score) {
        return fail(PassportReason::InvalidMinScore);
    }
    if let Some(min_confidence) = min_confidence {
        if !(0.0..=1.0).contains(&min_confidence) {
            return fail(PassportReason::InvalidMinConfidence);
        }
    }
    if result.confidence == 0.0 {
        return fail(PassportReason::InsufficientHistory);
    }
    if result.score < min_score {
        return fail(PassportReason::ScoreTooLow);
    }
    if result.score < 60.0
        && result
            .breakdown
            .factors
            .negative
            .iter()
            .any(|f| f.factor.contains("PACT-1"))
    {
        return fail(PassportReason::RecentPolicyViolation);
    }
    if result.score < 50.0
        && result
            .breakdown
            .factors
            .negative
            .iter()
            .any(|f| f.factor.contains("Dispute loss"))
    {
        return fail(PassportReason::DisputeFlagged);
    }
    if let Some(min_confidence) = min_confidence {
        if result.confidence < min_confidence {
            return fail(PassportReason::LowConfidence);
        }
    }
    RequirePassportResult {
        pass: true,
        reason: None,
    }
}
