//! Reputation-weighted quote acceptance (§4.8).

use serde::{Deserialize, Serialize};

/// Below this reputation, a buyer pays a surcharge on the quoted ask.
const LOW_REPUTATION_THRESHOLD: f64 = 0.5;
/// Surcharge applied at reputation 0.0; scales linearly to 0 at the
/// threshold above.
const MAX_SURCHARGE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDecision {
    pub accepted: bool,
    pub adjusted_ask: f64,
    pub flags: Vec<String>,
}

/// Adjust `ask` for a buyer of the given reputation and decide whether the
/// buyer's signaled max price can still afford it.
pub fn evaluate_quote(reputation: f64, ask: f64, buyer_max_price: f64) -> QuoteDecision {
    let reputation = reputation.clamp(0.0, 1.0);
    let mut flags = Vec::new();

    let multiplier = if reputation < LOW_REPUTATION_THRESHOLD {
        1.0 + (LOW_REPUTATION_THRESHOLD - reputation) / LOW_REPUTATION_THRESHOLD * MAX_SURCHARGE
    } else {
        1.0
    };
    if multiplier > 1.0 {
        flags.push("LOW_REP_SURCHARGE".to_string());
    }

    let adjusted_ask = ask * multiplier;
    let accepted = adjusted_ask <= buyer_max_price;

    QuoteDecision {
        accepted,
        adjusted_ask,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_reputation_pays_no_surcharge() {
        let decision = evaluate_quote(0.9, 100.0, 100.0);
        assert_eq!(decision.adjusted_ask, 100.0);
        assert!(decision.flags.is_empty());
        assert!(decision.accepted);
    }

    #[test]
    fn zero_reputation_pays_max_surcharge_and_is_flagged() {
        let decision = evaluate_quote(0.0, 100.0, 200.0);
        assert_eq!(decision.adjusted_ask, 140.0);
        assert_eq!(decision.flags, vec!["LOW_REP_SURCHARGE".to_string()]);
    }

    #[test]
    fn surcharge_can_make_quote_unaffordable() {
        let decision = evaluate_quote(0.1, 100.0, 105.0);
        assert!(!decision.accepted);
    }

    #[test]
    fn reputation_is_clamped_to_unit_interval() {
        let decision = evaluate_quote(-5.0, 100.0, 1000.0);
        assert_eq!(decision.adjusted_ask, 140.0);
    }
}
