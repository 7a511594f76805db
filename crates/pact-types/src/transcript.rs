//! Transcripts - sealed, hash-chained negotiation records (§3).

use crate::{FaultDomain, FailureCode, IntentId, PolicyId, Round, Terminality, TranscriptId};
use serde::{Deserialize, Serialize};

/// Recorded when a transcript did not reach a clean settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    pub code: FailureCode,
    pub stage: String,
    pub fault_domain: FaultDomain,
    pub terminality: Terminality,
    pub evidence_refs: Vec<String>,
    pub timestamp: i64,
    pub transcript_hash: String,
}

/// A sealed negotiation transcript.
///
/// `final_hash` seals the transcript once present (§3's ownership rule);
/// nothing in this core ever mutates a transcript after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub transcript_version: String,
    pub transcript_id: TranscriptId,
    pub intent_id: IntentId,
    pub intent_type: String,
    pub created_at_ms: i64,
    pub policy_hash: String,
    pub strategy_hash: String,
    pub identity_snapshot_hash: String,
    pub rounds: Vec<Round>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_event: Option<FailureEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_hash: Option<String>,
}

impl Transcript {
    /// Optionally attach a policy id this transcript was judged under; not
    /// part of the wire struct, exposed for callers that thread it through
    /// alongside a policy document. Present as a convenience accessor.
    pub fn policy_id(&self) -> PolicyId {
        PolicyId::from(self.policy_hash.clone())
    }

    /// The stable identifier used to deduplicate this transcript across
    /// recomputation (§4.6 step 14, glossary "Stable id"): `final_hash` if
    /// present, else `transcript_id`, else the caller must hash the
    /// canonical transcript itself (left to `pact-codec`, since this crate
    /// has no hashing dependency).
    pub fn stable_id_hint(&self) -> StableIdHint {
        match &self.final_hash {
            Some(hash) => StableIdHint::FinalHash(hash.clone()),
            None => StableIdHint::TranscriptId(self.transcript_id.clone()),
        }
    }

    /// This transcript as a JSON value with `round_hash`-bearing rounds
    /// intact but `failure_event`/`final_hash` removed, for recomputing
    /// `failure_event.transcript_hash` per §4.3 step 4.
    pub fn without_failure_and_final_hash(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).expect("Transcript always serializes");
        if let serde_json::Value::Object(ref mut map) = value {
            map.remove("failure_event");
            map.remove("final_hash");
        }
        value
    }

    /// This transcript as a JSON value with only `final_hash` removed,
    /// for recomputing `final_hash` itself per §4.3 step 5 (a digest can't
    /// cover its own value).
    pub fn without_final_hash(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).expect("Transcript always serializes");
        if let serde_json::Value::Object(ref mut map) = value {
            map.remove("final_hash");
        }
        value
    }
}

/// Which field should be hashed to obtain a transcript's stable id, per the
/// glossary. `TranscriptId` is a fallback that itself falls back further to
/// `hash(canonical(transcript))` when absent - callers needing that final
/// fallback do so explicitly since it requires the hashing crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StableIdHint {
    FinalHash(String),
    TranscriptId(TranscriptId),
}
