//! Transcript flagging and consolidated guard reporting (§4.8).

use crate::rate_limit::RateLimitCheck;
use crate::rejection::RejectionPenalty;
use serde::{Deserialize, Serialize};

/// One observed negotiation round's ask and counter-offer, as extracted
/// from a transcript's rounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NegotiationRound {
    pub ask: f64,
    pub counter_price: f64,
}

/// Flag negotiation rounds where the counter-offer undercuts the ask by
/// more than 70% (counter-price at or below 30% of ask).
pub fn flag_negotiation_rounds(rounds: &[NegotiationRound]) -> Vec<String> {
    rounds
        .iter()
        .enumerate()
        .filter(|(_, round)| round.ask > 0.0 && round.counter_price <= round.ask * 0.3)
        .map(|(index, _)| format!("LOWBALL_COUNTER_ROUND_{index}"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardReport {
    pub flags: Vec<String>,
    pub agent_status: String,
    pub explanations: Vec<String>,
}

/// Combine a rate-limit check, a rejection penalty, and negotiation-round
/// flags into a single consolidated report for an agent.
pub fn consolidate(
    rate_limit: Option<&RateLimitCheck>,
    rejection: Option<&RejectionPenalty>,
    negotiation_flags: Vec<String>,
) -> GuardReport {
    let mut flags = negotiation_flags;
    let mut explanations = Vec::new();

    if let Some(check) = rate_limit {
        if !check.ok {
            flags.push("RATE_LIMIT_EXCEEDED".to_string());
            explanations.push(format!(
                "rate limit exceeded: {}/{} in window",
                check.current_count, check.limit
            ));
        }
    }

    let bad_faith = rejection.is_some_and(|r| r.bad_faith_detected);
    if let Some(penalty) = rejection {
        flags.extend(penalty.flags.clone());
        if penalty.bad_faith_detected {
            explanations.push(format!(
                "bad-faith bidding detected, penalty multiplier {}",
                penalty.penalty_multiplier
            ));
        }
    }
    if !flags.is_empty() && flags.iter().any(|f| f.starts_with("LOWBALL_COUNTER")) {
        explanations.push("negotiation rounds contain lowball counter-offers".to_string());
    }

    let agent_status = if bad_faith {
        "BAD_FAITH"
    } else if !flags.is_empty() {
        "FLAGGED"
    } else {
        "OK"
    };

    GuardReport {
        flags,
        agent_status: agent_status.to_string(),
        explanations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_activity_is_ok() {
        let report = consolidate(None, None, vec![]);
        assert_eq!(report.agent_status, "OK");
        assert!(report.flags.is_empty());
    }

    #[test]
    fn lowball_counter_is_flagged() {
        let rounds = vec![NegotiationRound { ask: 100.0, counter_price: 20.0 }];
        let flags = flag_negotiation_rounds(&rounds);
        assert_eq!(flags, vec!["LOWBALL_COUNTER_ROUND_0".to_string()]);
        let report = consolidate(None, None, flags);
        assert_eq!(report.agent_status, "FLAGGED");
    }

    #[test]
    fn bad_faith_rejection_outranks_flagged_status() {
        let rejection = RejectionPenalty {
            bad_faith_detected: true,
            penalty_multiplier: 1.5,
            flags: vec!["BAD_FAITH_BIDDING".to_string()],
        };
        let report = consolidate(None, Some(&rejection), vec![]);
        assert_eq!(report.agent_status, "BAD_FAITH");
        assert!(report.flags.contains(&"BAD_FAITH_BIDDING".to_string()));
    }

    #[test]
    fn reasonable_counter_is_not_flagged() {
        let rounds = vec![NegotiationRound { ask: 100.0, counter_price: 80.0 }];
        assert!(flag_negotiation_rounds(&rounds).is_empty());
    }
}
