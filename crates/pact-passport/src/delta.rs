//! v1 pure delta form (§4.6 step 13).

use pact_blame::{Determination, Judgment};
use pact_types::PassportDelta;

/// The outcome a single transcript represents for one signer, as summarized
/// by the caller before computing a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOutcome {
    Success,
    PolicyAbort,
    SlaTimeout,
    Dispute,
    /// Blame's notes flagged a final-hash mismatch (§9 resolves the
    /// substring-vs-structured-flag open question in favor of a structured
    /// flag here - see `DESIGN.md`).
    IntegrityTamper,
}

/// Compute the fixed delta a transcript outcome contributes to one signer's
/// passport, per the bullet list in §4.6 step 13. `signer_is_buyer` records
/// whether the signer played the buyer role in this transcript (the INTENT
/// signer), needed to tell whether a judgment's determination blames this
/// signer specifically.
pub fn compute_delta(
    outcome: TranscriptOutcome,
    judgment: Option<&Judgment>,
    signer_is_buyer: bool,
) -> PassportDelta {
    match outcome {
        TranscriptOutcome::Success => PassportDelta {
            score_delta: 0.01,
            total_settlements: 1,
            successful_settlements: 1,
            ..Default::default()
        },
        TranscriptOutcome::PolicyAbort => PassportDelta {
            score_delta: -0.01,
            total_settlements: 1,
            policy_aborts: 1,
            ..Default::default()
        },
        TranscriptOutcome::SlaTimeout => PassportDelta {
            score_delta: -0.02,
            total_settlements: 1,
            sla_violations: 1,
            ..Default::default()
        },
        TranscriptOutcome::Dispute => dispute_delta(judgment, signer_is_buyer),
        TranscriptOutcome::IntegrityTamper => PassportDelta {
            score_delta: -0.2,
            ..Default::default()
        },
    }
}

fn dispute_delta(judgment: Option<&Judgment>, signer_is_buyer: bool) -> PassportDelta {
    let Some(judgment) = judgment else {
        return PassportDelta::default();
    };
    let blame_matches_signer = match judgment.determination {
        Determination::BuyerAtFault | Determination::BuyerRailAtFault => signer_is_buyer,
        Determination::ProviderAtFault | Determination::ProviderRailAtFault => !signer_is_buyer,
        Determination::NoFault | Determination::Indeterminate => false,
    };
    if blame_matches_signer {
        PassportDelta {
            score_delta: judgment.passport_impact,
            disputes_lost: 1,
            ..Default::default()
        }
    } else if judgment.passport_impact > 0.0 {
        PassportDelta {
            score_delta: 0.01,
            disputes_won: 1,
            ..Default::default()
        }
    } else {
        PassportDelta::default()
    }
}
