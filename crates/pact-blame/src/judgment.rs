//! Judgment artifact and blame resolution (C4, §4.4).

use pact_types::{FaultDomain, Transcript};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JudgmentStatus {
    Ok,
    Failed,
    Indeterminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredNextActor {
    Buyer,
    Provider,
    Rail,
    Settlement,
    Arbiter,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Determination {
    NoFault,
    BuyerAtFault,
    ProviderAtFault,
    BuyerRailAtFault,
    ProviderRailAtFault,
    Indeterminate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub status: JudgmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    pub last_valid_round: i64,
    pub required_next_actor: RequiredNextActor,
    pub determination: Determination,
    pub passport_impact: f64,
    pub confidence: f64,
    pub evidence_refs: Vec<String>,
}

/// The agent_id label a buyer's INTENT round is conventionally signed with.
/// Label comparisons here are for blame attribution only, never for scoring
/// or credit grouping (§9 - the canonical identity there is always the
/// signer key).
const BUYER_LABEL: &str = "buyer";

/// Resolve a judgment from an already integrity-verified transcript.
///
/// This resolver does not re-check cryptographic integrity; callers run
/// [`pact_transcript::verify_transcript`] first and only resolve blame on a
/// transcript that is itself internally consistent.
pub fn resolve(transcript: &Transcript) -> Judgment {
    let last_valid_round = transcript
        .rounds
        .last()
        .map(|r| r.round_number as i64)
        .unwrap_or(-1);

    let is_complete = transcript.failure_event.is_some() || transcript.final_hash.is_some();
    if !is_complete {
        return Judgment {
            status: JudgmentStatus::Indeterminate,
            failure_code: None,
            last_valid_round,
            required_next_actor: RequiredNextActor::Arbiter,
            determination: Determination::Indeterminate,
            passport_impact: 0.0,
            confidence: 0.2,
            evidence_refs: vec![format!("last_valid_round:{last_valid_round}")],
        };
    }

    let Some(failure) = &transcript.failure_event else {
        return Judgment {
            status: JudgmentStatus::Ok,
            failure_code: None,
            last_valid_round,
            required_next_actor: RequiredNextActor::None,
            determination: Determination::NoFault,
            passport_impact: 0.0,
            confidence: 1.0,
            evidence_refs: vec![format!("last_valid_round:{last_valid_round}")],
        };
    };

    let last_round_is_explicit_abort = transcript
        .rounds
        .last()
        .is_some_and(|r| r.round_type == "ABORT");
    let last_round_is_buyer = transcript
        .rounds
        .last()
        .is_some_and(|r| r.agent_id.0 == BUYER_LABEL);

    let (determination, required_next_actor, confidence) = match failure.fault_domain {
        FaultDomain::Policy | FaultDomain::Identity | FaultDomain::Negotiation => {
            let determination = if last_round_is_buyer {
                Determination::BuyerAtFault
            } else {
                Determination::ProviderAtFault
            };
            let actor = match failure.fault_domain {
                FaultDomain::Policy | FaultDomain::Negotiation => RequiredNextActor::Buyer,
                FaultDomain::Identity => {
                    if last_round_is_buyer {
                        RequiredNextActor::Buyer
                    } else {
                        RequiredNextActor::Provider
                    }
                }
                _ => unreachable!(),
            };
            let confidence = if last_round_is_explicit_abort { 0.9 } else { 0.6 };
            (determination, actor, confidence)
        }
        FaultDomain::Settlement => {
            let determination = if last_round_is_explicit_abort {
                if last_round_is_buyer {
                    Determination::BuyerRailAtFault
                } else {
                    Determination::ProviderRailAtFault
                }
            } else {
                Determination::ProviderRailAtFault
            };
            let confidence = if last_round_is_explicit_abort { 0.9 } else { 0.5 };
            (determination, RequiredNextActor::Rail, confidence)
        }
        FaultDomain::Recursive => (Determination::Indeterminate, RequiredNextActor::Arbiter, 0.3),
    };

    let severity = failure.fault_domain.base_severity()
        * pact_types::family_multiplier(&failure.code);
    let passport_impact = -severity.min(1.0);

    let mut evidence_refs = vec![
        format!("failure_code:{}", failure.code),
        format!("fault_domain:{}", failure.fault_domain),
        format!("stage:{}", failure.stage),
        format!("last_valid_round:{last_valid_round}"),
    ];
    evidence_refs.extend(failure.evidence_refs.iter().cloned());

    tracing::debug!(
        transcript_id = %transcript.transcript_id,
        failure_code = %failure.code,
        ?determination,
        "resolved blame judgment"
    );

    Judgment {
        status: JudgmentStatus::Failed,
        failure_code: Some(failure.code.to_string()),
        last_valid_round,
        required_next_actor,
        determination,
        passport_impact,
        confidence,
        evidence_refs,
    }
}
