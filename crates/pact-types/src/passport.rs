//! Passport events and derived state (§3, §4.6).

use crate::{FailureCode, FaultDomain, PASSPORT_VERSION, SignerKey, Terminality};
use serde::{Deserialize, Serialize};

/// The closed set of passport-relevant event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassportEventKind {
    SettlementSuccess,
    SettlementFailure,
    DisputeResolved,
}

/// Outcome of a dispute, when `kind == DisputeResolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeOutcome {
    Wins,
    Losses,
    Dismissed,
    Split,
}

/// One derived event for a single signer, extracted from an ingested
/// transcript. Uniquely keyed by `(transcript_stable_id, signer_public_key_b58)`
/// - never by `agent_id` (§3, §9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportEvent {
    pub kind: PassportEventKind,
    pub ts: i64,
    pub transcript_hash: String,
    pub counterparty_key: SignerKey,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<FailureCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_domain: Option<FaultDomain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminality: Option<Terminality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispute_outcome: Option<DisputeOutcome>,
}

/// Per-signer counters tracked alongside the derived score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportCounters {
    pub total_settlements: u64,
    pub successful_settlements: u64,
    pub disputes_lost: u64,
    pub disputes_won: u64,
    pub sla_violations: u64,
    pub policy_aborts: u64,
}

/// Full passport state for one signer. Never stored as authority - always
/// recomputable from the event log (§3's ownership rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportState {
    pub version: String,
    pub signer_key: SignerKey,
    /// Clamped to `[-1, 1]` - the v1 delta-form scale (§3, §8).
    pub score: f64,
    pub counters: PassportCounters,
}

impl PassportState {
    pub fn bootstrap(signer_key: SignerKey) -> Self {
        Self {
            version: PASSPORT_VERSION.to_string(),
            signer_key,
            score: 0.0,
            counters: PassportCounters::default(),
        }
    }
}

/// A delta-only update to a [`PassportState`], as produced by the v1 pure
/// delta form (§4.6 step 13). Partial counter increments only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportDelta {
    pub score_delta: f64,
    pub total_settlements: u64,
    pub successful_settlements: u64,
    pub disputes_lost: u64,
    pub disputes_won: u64,
    pub sla_violations: u64,
    pub policy_aborts: u64,
}

impl PassportDelta {
    /// Fold this delta into a state, clamping the resulting score to
    /// `[-1, 1]` per §4.6 step 13 ("applyDelta clamps the score").
    pub fn apply(&self, state: &PassportState) -> PassportState {
        PassportState {
            version: state.version.clone(),
            signer_key: state.signer_key.clone(),
            score: (state.score + self.score_delta).clamp(-1.0, 1.0),
            counters: PassportCounters {
                total_settlements: state.counters.total_settlements + self.total_settlements,
                successful_settlements: state.counters.successful_settlements
                    + self.successful_settlements,
                disputes_lost: state.counters.disputes_lost + self.disputes_lost,
                disputes_won: state.counters.disputes_won + self.disputes_won,
                sla_violations: state.counters.sla_violations + self.sla_violations,
                policy_aborts: state.counters.policy_aborts + self.policy_aborts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_clamps_score_to_unit_interval() {
        let state = PassportState::bootstrap(SignerKey::from("buyer"));
        let delta = PassportDelta {
            score_delta: 5.0,
            ..Default::default()
        };
        let next = delta.apply(&state);
        assert_eq!(next.score, 1.0);
    }

    #[test]
    fn apply_accumulates_counters() {
        let state = PassportState::bootstrap(SignerKey::from("buyer"));
        let delta = PassportDelta {
            score_delta: 0.01,
            total_settlements: 1,
            successful_settlements: 1,
            ..Default::default()
        };
        let next = delta.apply(&state);
        assert_eq!(next.counters.total_settlements, 1);
        assert_eq!(next.counters.successful_settlements, 1);
        assert!((next.score - 0.01).abs() < 1e-12);
    }
}
