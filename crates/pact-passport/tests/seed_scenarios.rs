//! Cross-module scenarios exercising the public scoring, gating, and
//! recompute surface together, as opposed to the unit tests living beside
//! each algorithm in `src/`.

use pact_passport::{compute_score, recompute, require_passport, RecomputeEntry};
use pact_types::{DisputeOutcome, FailureCode, FaultDomain, PassportDelta, PassportEvent, PassportEventKind, SignerKey, Terminality};
use std::collections::HashMap;

fn success_event(ts: i64, counterparty: &str, value: f64) -> PassportEvent {
    PassportEvent {
        kind: PassportEventKind::SettlementSuccess,
        ts,
        transcript_hash: format!("hash-{ts}"),
        counterparty_key: SignerKey::from(counterparty),
        value,
        failure_code: None,
        stage: None,
        fault_domain: None,
        terminality: None,
        dispute_outcome: None,
    }
}

fn streak(now: i64, counterparty: &str, value: f64, count: i64) -> Vec<PassportEvent> {
    let t0 = now - 1_000_000;
    (0..count)
        .map(|i| success_event(t0 + i, counterparty, value))
        .collect()
}

#[test]
fn scenario_1_clean_success_streak() {
    let now = 2_000_000;
    let events = streak(now, "SEL", 0.00005, 5);
    let result = compute_score(&events, now, &HashMap::new());

    assert!(result.score > 70.0, "score was {}", result.score);
    assert!(result.confidence > 0.3, "confidence was {}", result.confidence);
    let top = &result.breakdown.factors.positive[0];
    assert!(top.factor.contains("SEL"));
    assert!(top.factor.contains("Success transaction"));
}

#[test]
fn scenario_2_policy_violation_after_streak_fails_require_passport() {
    let now = 2_000_000;
    let mut events = streak(now, "SEL", 0.00005, 5);
    events.push(PassportEvent {
        kind: PassportEventKind::SettlementFailure,
        ts: now - 1_000_000 + 5,
        transcript_hash: "hash-violation".to_string(),
        counterparty_key: SignerKey::from("SEL"),
        value: 0.0,
        failure_code: Some(FailureCode::new("PACT-101")),
        stage: Some("negotiation".to_string()),
        fault_domain: Some(FaultDomain::Policy),
        terminality: Some(Terminality::Terminal),
        dispute_outcome: None,
    });

    let streak_only = compute_score(&streak(now, "SEL", 0.00005, 5), now, &HashMap::new());
    let with_violation = compute_score(&events, now, &HashMap::new());

    assert!(with_violation.score < streak_only.score);
    assert!(with_violation.breakdown.factors.negative[0]
        .factor
        .contains("PACT-101"));

    let gate = require_passport(&with_violation, 60.0, None);
    assert!(!gate.pass);
}

#[test]
fn scenario_3_wash_trading_detection() {
    let now = 2_000_000;
    let events = streak(now, "SEL", 0.00005, 10);
    let result = compute_score(&events, now, &HashMap::new());

    assert!(result.score < 80.0, "score was {}", result.score);
    assert!(result
        .breakdown
        .warnings
        .iter()
        .any(|w| w.contains("High frequency")));
}

#[test]
fn scenario_4_dispute_loss_decreases_score() {
    let now = 2_000_000;
    let mut events = streak(now, "SEL", 0.00005, 5);
    let before = compute_score(&events, now, &HashMap::new());

    events.push(PassportEvent {
        kind: PassportEventKind::DisputeResolved,
        ts: now - 1_000_000 + 5,
        transcript_hash: "hash-dispute".to_string(),
        counterparty_key: SignerKey::from("SEL"),
        value: 0.0,
        failure_code: None,
        stage: None,
        fault_domain: Some(FaultDomain::Policy),
        terminality: None,
        dispute_outcome: Some(DisputeOutcome::Losses),
    });
    let after = compute_score(&events, now, &HashMap::new());

    assert!(after.score < before.score);
    assert!(after
        .breakdown
        .factors
        .negative
        .iter()
        .any(|f| f.factor.contains("Dispute loss")));
}

#[test]
fn scenario_6_recompute_is_permutation_invariant_across_transcripts() {
    let target = SignerKey::from("BUY");
    let t1 = RecomputeEntry {
        stable_id: "transcript-1".to_string(),
        signer_key: target.clone(),
        delta: PassportDelta {
            score_delta: 0.01,
            total_settlements: 1,
            successful_settlements: 1,
            ..Default::default()
        },
    };
    let t2 = RecomputeEntry {
        stable_id: "transcript-2".to_string(),
        signer_key: target.clone(),
        delta: PassportDelta {
            score_delta: -0.02,
            total_settlements: 1,
            sla_violations: 1,
            ..Default::default()
        },
    };

    let forward = recompute(&[t1.clone(), t2.clone()], Some(&target));
    let backward = recompute(&[t2, t1], Some(&target));

    assert_eq!(forward.score, backward.score);
    assert_eq!(forward.counters, backward.counters);
}
