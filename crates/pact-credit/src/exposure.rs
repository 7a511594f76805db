//! `canExtendCredit` and idempotent credit event application (§4.7).

use pact_types::{CreditExposure, CreditState, CreditTier, SignerKey};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of a credit-extension check. `reasons` is empty iff `allowed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDecision {
    pub allowed: bool,
    pub reasons: Vec<String>,
}

fn deny(reason: &str) -> CreditDecision {
    CreditDecision {
        allowed: false,
        reasons: vec![reason.to_string()],
    }
}

/// Decide whether `amount` of new exposure to `counterparty` may be
/// extended under the signer's current credit state and exposure.
pub fn can_extend_credit(
    state: &CreditState,
    exposure: &CreditExposure,
    counterparty: &SignerKey,
    amount_usd: f64,
    now_ms: i64,
) -> CreditDecision {
    if state.tier == CreditTier::C || state.is_kill_switched(now_ms) {
        let mut decision = deny("TIER_C_OR_KILL_SWITCHED");
        if let Some(reason) = &state.reason {
            decision.reasons.push(reason.clone());
        }
        return decision;
    }

    let required_collateral = amount_usd * state.collateral_ratio;
    let credit_exposure = amount_usd - required_collateral;

    let mut reasons = Vec::new();
    if exposure.outstanding_usd + credit_exposure > state.max_outstanding_usd {
        reasons.push("OUTSTANDING_EXPOSURE_EXCEEDED".to_string());
    }
    if credit_exposure > state.max_per_intent_usd {
        reasons.push("PER_INTENT_EXPOSURE_EXCEEDED".to_string());
    }
    if exposure.counterparty_usd(counterparty) + credit_exposure > state.max_per_counterparty_usd {
        reasons.push("PER_COUNTERPARTY_EXPOSURE_EXCEEDED".to_string());
    }

    CreditDecision {
        allowed: reasons.is_empty(),
        reasons,
    }
}

/// Whether a transcript outcome, summarized for one counterparty, extends
/// or releases exposure once applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditEventOutcome {
    /// A settlement succeeded with an `ACCEPT` round: exposure is held.
    AcceptedSuccess,
    /// A terminal failure: exposure previously held is released.
    TerminalFailure,
}

/// Apply a credit event from a transcript to a signer's exposure,
/// idempotently keyed on `transcript_hash`. `seen_hashes` tracks hashes
/// already applied; a repeat is a no-op that still reports `false`.
pub fn apply_credit_event(
    exposure: &mut CreditExposure,
    seen_hashes: &mut HashSet<String>,
    transcript_hash: &str,
    counterparty: &SignerKey,
    amount_usd: f64,
    outcome: CreditEventOutcome,
) -> bool {
    if !seen_hashes.insert(transcript_hash.to_string()) {
        return false;
    }
    match outcome {
        CreditEventOutcome::AcceptedSuccess => exposure.record(counterparty.clone(), amount_usd),
        CreditEventOutcome::TerminalFailure => exposure.release(counterparty, amount_usd),
    }
    true
}
