//! Tier computation, tier terms, kill-switches, and downgrades (§4.7).

use pact_types::{CreditState, CreditTier, FailureCode};
use serde::{Deserialize, Serialize};

const THIRTY_DAYS_MS: i64 = 30 * 24 * 3_600_000;
const SEVEN_DAYS_MS: i64 = 7 * 24 * 3_600_000;
const SIXTY_DAYS_MS: i64 = 60 * 24 * 3_600_000;

/// A recent failure observed for a signer, as fed by the event store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub code: FailureCode,
    pub ts_ms: i64,
}

/// A recent dispute-loss observed for a signer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisputeLossRecord {
    pub ts_ms: i64,
}

/// Base tier from score and confidence alone, before kill-switches or
/// downgrades (§4.7's tier computation rule).
pub fn base_tier(score: f64, confidence: f64) -> CreditTier {
    if score >= 85.0 && confidence >= 0.8 {
        CreditTier::A
    } else if (70.0..85.0).contains(&score) && confidence >= 0.7 {
        CreditTier::B
    } else {
        CreditTier::C
    }
}

struct TierTerms {
    max_outstanding_usd: f64,
    max_per_intent_usd: f64,
    max_per_counterparty_usd: f64,
    collateral_ratio: f64,
    required_escrow: bool,
}

fn terms_for_tier(tier: CreditTier) -> TierTerms {
    match tier {
        CreditTier::A => TierTerms {
            max_outstanding_usd: 5000.0,
            max_per_intent_usd: 2000.0,
            max_per_counterparty_usd: 1000.0,
            collateral_ratio: 0.20,
            required_escrow: false,
        },
        CreditTier::B => TierTerms {
            max_outstanding_usd: 1000.0,
            max_per_intent_usd: 500.0,
            max_per_counterparty_usd: 200.0,
            collateral_ratio: 0.50,
            required_escrow: true,
        },
        CreditTier::C => TierTerms {
            max_outstanding_usd: 0.0,
            max_per_intent_usd: 0.0,
            max_per_counterparty_usd: 0.0,
            collateral_ratio: 1.00,
            required_escrow: true,
        },
    }
}

fn downgrade_once(tier: CreditTier) -> CreditTier {
    match tier {
        CreditTier::A => CreditTier::B,
        CreditTier::B | CreditTier::C => CreditTier::C,
    }
}

/// Count of PACT-4xx failures within `window_ms` of `now_ms`.
fn count_family_in_window(failures: &[FailureRecord], family_digit: u32, now_ms: i64, window_ms: i64) -> usize {
    failures
        .iter()
        .filter(|f| now_ms - f.ts_ms <= window_ms && f.code.family_digit() == Some(family_digit))
        .count()
}

fn has_family_in_window(failures: &[FailureRecord], family_digit: u32, now_ms: i64, window_ms: i64) -> bool {
    count_family_in_window(failures, family_digit, now_ms, window_ms) > 0
}

/// Compute full credit terms for a signer: base tier from score/confidence,
/// soft downgrades from recent failure/dispute history, then kill-switches
/// which unconditionally override the result to tier C.
pub fn compute_credit_terms(
    score: f64,
    confidence: f64,
    now_ms: i64,
    recent_failures: &[FailureRecord],
    recent_dispute_losses: &[DisputeLossRecord],
) -> CreditState {
    let mut tier = base_tier(score, confidence);

    let burst_4xx = count_family_in_window(recent_failures, 4, now_ms, SEVEN_DAYS_MS) >= 3;
    let dispute_loss = recent_dispute_losses
        .iter()
        .any(|d| now_ms - d.ts_ms <= SIXTY_DAYS_MS);
    for _ in 0..(burst_4xx as u8 + dispute_loss as u8) {
        tier = downgrade_once(tier);
    }

    let mut disabled_until = None;
    let mut reason = None;

    if has_family_in_window(recent_failures, 1, now_ms, THIRTY_DAYS_MS) {
        tier = CreditTier::C;
        disabled_until = Some(now_ms + THIRTY_DAYS_MS);
        reason = Some("PACT-1xx_VIOLATION".to_string());
    } else if has_family_in_window(recent_failures, 2, now_ms, THIRTY_DAYS_MS) {
        tier = CreditTier::C;
        disabled_until = Some(now_ms + THIRTY_DAYS_MS);
        reason = Some("IDENTITY_FAILURE".to_string());
    } else if count_family_in_window(recent_failures, 4, now_ms, THIRTY_DAYS_MS) >= 10 {
        tier = CreditTier::C;
        disabled_until = Some(now_ms + THIRTY_DAYS_MS);
        reason = Some("SETTLEMENT_FAILURES_EXCESSIVE".to_string());
    }

    let terms = terms_for_tier(tier);
    tracing::debug!(?tier, ?reason, "computed credit terms");
    CreditState {
        tier,
        max_outstanding_usd: terms.max_outstanding_usd,
        max_per_intent_usd: terms.max_per_intent_usd,
        max_per_counterparty_usd: terms.max_per_counterparty_usd,
        collateral_ratio: terms.collateral_ratio,
        required_escrow: terms.required_escrow,
        disabled_until,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(code: &str, ts_ms: i64) -> FailureRecord {
        FailureRecord {
            code: FailureCode::new(code),
            ts_ms,
        }
    }

    #[test]
    fn tier_boundaries_are_exact_no_float_fuzz() {
        assert_eq!(base_tier(85.0, 0.8), CreditTier::A);
        assert_eq!(base_tier(84.999_999, 0.8), CreditTier::B);
        assert_eq!(base_tier(70.0, 0.7), CreditTier::B);
        assert_eq!(base_tier(69.999_999, 0.7), CreditTier::C);
    }

    #[test]
    fn clean_high_score_gets_tier_a_with_full_terms() {
        let state = compute_credit_terms(90.0, 0.9, 1_000_000, &[], &[]);
        assert_eq!(state.tier, CreditTier::A);
        assert_eq!(state.max_outstanding_usd, 5000.0);
        assert!(!state.required_escrow);
        assert!(state.disabled_until.is_none());
    }

    #[test]
    fn kill_switch_on_pact_1xx_within_30_days() {
        let now_ms: i64 = 10 * 24 * 3_600_000;
        let failures = vec![failure("PACT-101", now_ms - 5 * 24 * 3_600_000)];
        let state = compute_credit_terms(90.0, 0.85, now_ms, &failures, &[]);
        assert_eq!(state.tier, CreditTier::C);
        assert_eq!(state.reason.as_deref(), Some("PACT-1xx_VIOLATION"));
        assert!(state.disabled_until.is_some());
    }

    #[test]
    fn old_pact_1xx_outside_window_does_not_kill_switch() {
        let now_ms: i64 = 100 * 24 * 3_600_000;
        let failures = vec![failure("PACT-101", 0)];
        let state = compute_credit_terms(90.0, 0.85, now_ms, &failures, &[]);
        assert_eq!(state.tier, CreditTier::A);
    }

    #[test]
    fn burst_of_four_xx_downgrades_tier_without_kill_switch() {
        let now_ms: i64 = 1_000_000;
        let failures = vec![
            failure("PACT-401", now_ms - 1_000),
            failure("PACT-402", now_ms - 2_000),
            failure("PACT-403", now_ms - 3_000),
        ];
        let state = compute_credit_terms(90.0, 0.85, now_ms, &failures, &[]);
        assert_eq!(state.tier, CreditTier::B);
        assert!(state.disabled_until.is_none());
    }

    #[test]
    fn ten_four_xx_in_30_days_hard_kill_switches() {
        let now_ms: i64 = 1_000_000;
        let failures: Vec<FailureRecord> = (0..10)
            .map(|i| failure("PACT-404", now_ms - i * 1_000))
            .collect();
        let state = compute_credit_terms(90.0, 0.85, now_ms, &failures, &[]);
        assert_eq!(state.tier, CreditTier::C);
        assert_eq!(state.reason.as_deref(), Some("SETTLEMENT_FAILURES_EXCESSIVE"));
    }

    #[test]
    fn dispute_loss_and_four_xx_burst_both_downgrade() {
        let now_ms: i64 = 1_000_000;
        let failures = vec![
            failure("PACT-401", now_ms - 1_000),
            failure("PACT-402", now_ms - 2_000),
            failure("PACT-403", now_ms - 3_000),
        ];
        let disputes = vec![DisputeLossRecord { ts_ms: now_ms - 1_000 }];
        let state = compute_credit_terms(90.0, 0.85, now_ms, &failures, &disputes);
        assert_eq!(state.tier, CreditTier::C);
        assert!(state.disabled_until.is_none());
    }
}
