//! A single signed, numbered step in a transcript (§3).

use crate::{AgentLabel, SignatureB58, SignerKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub round_type: String,
    pub envelope_hash: String,
    pub message_hash: String,
    pub signature: SignatureB58,
    pub timestamp_ms: i64,
    pub previous_round_hash: String,
    pub round_hash: String,
    /// Advisory role label only - never a grouping key. See §9.
    pub agent_id: AgentLabel,
    pub public_key_b58: SignerKey,
    pub content_summary: Value,
}

impl Round {
    /// This round with its own `round_hash` field removed, for recomputing
    /// the hash per §4.3 step 3 (`r'` in the spec text).
    pub fn without_round_hash(&self) -> Value {
        let mut value = serde_json::to_value(self).expect("Round always serializes");
        if let Value::Object(ref mut map) = value {
            map.remove("round_hash");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_round() -> Round {
        Round {
            round_number: 0,
            round_type: "INTENT".to_string(),
            envelope_hash: "e".repeat(64),
            message_hash: "m".repeat(64),
            signature: SignatureB58("sig".to_string()),
            timestamp_ms: 1,
            previous_round_hash: "p".repeat(64),
            round_hash: "r".repeat(64),
            agent_id: AgentLabel("buyer".to_string()),
            public_key_b58: SignerKey("key1".to_string()),
            content_summary: serde_json::json!({"note": "hi"}),
        }
    }

    #[test]
    fn without_round_hash_drops_only_that_field() {
        let round = sample_round();
        let stripped = round.without_round_hash();
        let obj = stripped.as_object().unwrap();
        assert!(!obj.contains_key("round_hash"));
        assert!(obj.contains_key("round_number"));
    }
}
