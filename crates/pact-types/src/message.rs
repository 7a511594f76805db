//! Negotiation messages.
//!
//! Per §3 the message kind set is closed; per §9 it is modelled as a tagged
//! union and matched exhaustively everywhere - no default arm swallows an
//! unrecognized kind.

use crate::IntentId;
use serde::{Deserialize, Serialize};

/// Settlement mode negotiated between the parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    Escrow,
    Direct,
    Streaming,
}

/// A single negotiation message, wrapped kind-first per §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub intent_id: IntentId,
    pub sent_at_ms: i64,
    pub expires_at_ms: i64,
    #[serde(flatten)]
    pub kind: MessageKind,
}

/// The closed set of message kinds, each carrying its own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    Intent {
        asset: String,
        max_price: f64,
        urgent: bool,
    },
    Ask {
        price: f64,
        valid_for_ms: i64,
    },
    Bid {
        price: f64,
    },
    Counter {
        price: f64,
    },
    Accept {
        price: f64,
        settlement_mode: SettlementMode,
    },
    Reject {
        reason: Option<String>,
    },
    Abort {
        reason: Option<String>,
    },
    Commit {
        commit_hash: String,
        bond: f64,
    },
    Reveal {
        reveal_value: String,
    },
    /// Administrative receipt round; carries no negotiation semantics.
    Receipt {
        reference: String,
    },
}

impl MessageKind {
    /// The kind's wire label, e.g. `"BID"`.
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Intent { .. } => "INTENT",
            MessageKind::Ask { .. } => "ASK",
            MessageKind::Bid { .. } => "BID",
            MessageKind::Counter { .. } => "COUNTER",
            MessageKind::Accept { .. } => "ACCEPT",
            MessageKind::Reject { .. } => "REJECT",
            MessageKind::Abort { .. } => "ABORT",
            MessageKind::Commit { .. } => "COMMIT",
            MessageKind::Reveal { .. } => "REVEAL",
            MessageKind::Receipt { .. } => "RECEIPT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_wire_tag() {
        let msg = MessageKind::Bid { price: 10.0 };
        assert_eq!(msg.label(), "BID");
    }

    #[test]
    fn round_trips_through_json() {
        let msg = Message {
            intent_id: IntentId::from("intent-1"),
            sent_at_ms: 100,
            expires_at_ms: 200,
            kind: MessageKind::Accept {
                price: 42.5,
                settlement_mode: SettlementMode::Escrow,
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }
}
