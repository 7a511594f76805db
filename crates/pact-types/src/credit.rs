//! Credit tiers and exposure tracking (§3, §4.7).

use crate::SignerKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three credit tiers a signer can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditTier {
    A,
    B,
    C,
}

/// The credit posture for one signer: caps, collateral terms, and whether
/// credit extension is currently disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditState {
    pub tier: CreditTier,
    pub max_outstanding_usd: f64,
    pub max_per_intent_usd: f64,
    pub max_per_counterparty_usd: f64,
    /// Fraction of exposure that must be collateralized, in `[0, 1]`.
    pub collateral_ratio: f64,
    pub required_escrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CreditState {
    pub fn is_kill_switched(&self, now_ms: i64) -> bool {
        self.disabled_until.is_some_and(|until| now_ms < until)
    }
}

/// Current outstanding exposure for one signer, broken out per counterparty.
/// Keyed by `counterparty_key` (the base58 signer key), never by `agent_id`
/// (§9's canonical identity invariant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditExposure {
    pub outstanding_usd: f64,
    pub per_counterparty_usd: BTreeMap<SignerKey, f64>,
}

impl CreditExposure {
    pub fn counterparty_usd(&self, counterparty: &SignerKey) -> f64 {
        self.per_counterparty_usd
            .get(counterparty)
            .copied()
            .unwrap_or(0.0)
    }

    /// Record new exposure to a counterparty, returning the updated total.
    pub fn record(&mut self, counterparty: SignerKey, amount_usd: f64) {
        self.outstanding_usd += amount_usd;
        *self.per_counterparty_usd.entry(counterparty).or_insert(0.0) += amount_usd;
    }

    /// Release previously recorded exposure, e.g. on settlement.
    pub fn release(&mut self, counterparty: &SignerKey, amount_usd: f64) {
        self.outstanding_usd = (self.outstanding_usd - amount_usd).max(0.0);
        if let Some(existing) = self.per_counterparty_usd.get_mut(counterparty) {
            *existing = (*existing - amount_usd).max(0.0);
        }
    }
}
