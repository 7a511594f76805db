//! Rejection-penalty tracking (§4.8).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const WINDOW_MS: i64 = 5 * 60_000;
const BAD_FAITH_THRESHOLD: usize = 3;
const BID_GAP_THRESHOLD: f64 = 0.5;
const BAD_FAITH_PENALTY_MULTIPLIER: f64 = 1.5;

struct RejectionEvent {
    ts_ms: i64,
    bid_gap_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectionPenalty {
    pub bad_faith_detected: bool,
    pub penalty_multiplier: f64,
    pub flags: Vec<String>,
}

/// Tracks rejections between an agent and counterparty over a rolling
/// 5-minute window, flagging bad-faith bidding once enough rejections carry
/// a large bid/ask gap.
#[derive(Default)]
pub struct RejectionTracker {
    rejections: HashMap<(String, String), Vec<RejectionEvent>>,
}

impl RejectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_rejection(
        &mut self,
        agent: &str,
        counterparty: &str,
        now_ms: i64,
        bid_gap_pct: f64,
    ) -> RejectionPenalty {
        let key = (agent.to_string(), counterparty.to_string());
        let entry = self.rejections.entry(key).or_default();
        entry.retain(|e| now_ms - e.ts_ms < WINDOW_MS);
        entry.push(RejectionEvent { ts_ms: now_ms, bid_gap_pct });

        let qualifying = entry.iter().filter(|e| e.bid_gap_pct > BID_GAP_THRESHOLD).count();
        if qualifying >= BAD_FAITH_THRESHOLD {
            RejectionPenalty {
                bad_faith_detected: true,
                penalty_multiplier: BAD_FAITH_PENALTY_MULTIPLIER,
                flags: vec!["BAD_FAITH_BIDDING".to_string()],
            }
        } else {
            RejectionPenalty {
                bad_faith_detected: false,
                penalty_multiplier: 1.0,
                flags: vec![],
            }
        }
    }
}
