//! Event-sourced passport scoring (C6, §4.6 steps 1-11).

use pact_types::{DisputeOutcome, PassportEvent, PassportEventKind, SignerKey, Terminality};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const HALF_LIFE_MS: f64 = 90.0 * 24.0 * 3_600_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub factor: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    pub positive: Vec<Factor>,
    pub negative: Vec<Factor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factors: Factors,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportScoreResult {
    /// On the query 0-100 scale (§3's passport state scale), not the v1
    /// delta form's [-1, 1] scale.
    pub score: f64,
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Compute a signer's passport score from their event history as of `now_ms`.
/// `counterparty_scores` supplies each counterparty's own 0-100 score when
/// known; an unlisted counterparty falls back to the bootstrap weight
/// (§9 resolves the open question on recursive counterparty scoring by
/// never recursing - see `DESIGN.md`).
pub fn compute_score(
    events: &[PassportEvent],
    now_ms: i64,
    counterparty_scores: &HashMap<SignerKey, f64>,
) -> PassportScoreResult {
    let has_success = events
        .iter()
        .any(|e| e.kind == PassportEventKind::SettlementSuccess);
    let has_failure = events.iter().any(|e| {
        e.kind == PassportEventKind::SettlementFailure
            && e.terminality == Some(Terminality::Terminal)
    });

    // Step 1: bootstrap.
    if events.len() < 3 && !(has_success && has_failure) {
        return PassportScoreResult {
            score: 50.0,
            confidence: 0.0,
            breakdown: ScoreBreakdown::default(),
            warning: Some("Insufficient data".to_string()),
        };
    }

    // Step 2: event separation. Non-terminal failures are excluded entirely.
    let successes: Vec<&PassportEvent> = events
        .iter()
        .filter(|e| e.kind == PassportEventKind::SettlementSuccess)
        .collect();
    let failures: Vec<&PassportEvent> = events
        .iter()
        .filter(|e| {
            e.kind == PassportEventKind::SettlementFailure
                && e.terminality == Some(Terminality::Terminal)
        })
        .collect();
    let disputes: Vec<&PassportEvent> = events
        .iter()
        .filter(|e| e.kind == PassportEventKind::DisputeResolved)
        .collect();

    let settlement_events: Vec<&&PassportEvent> = successes.iter().chain(failures.iter()).collect();
    let total_settlements = settlement_events.len().max(1) as f64;

    let mut counterparty_counts: HashMap<&SignerKey, usize> = HashMap::new();
    for event in &settlement_events {
        *counterparty_counts.entry(&event.counterparty_key).or_insert(0) += 1;
    }
    let unique_counterparties = counterparty_counts.len();

    // Step 5: wash-trading penalty, per counterparty share of settlements.
    let wash_factor = |counterparty: &SignerKey| -> f64 {
        let count = counterparty_counts.get(counterparty).copied().unwrap_or(0) as f64;
        let share = count / total_settlements;
        if share <= 0.3 {
            1.0
        } else {
            let t = (share - 0.3) / 0.7;
            1.0 - t * 0.5
        }
    };

    // Step 6: collusion penalty.
    let max_share = counterparty_counts
        .values()
        .copied()
        .max()
        .unwrap_or(0) as f64
        / total_settlements;
    let concentration_penalty = (max_share - 0.3).max(0.0) * 0.8;
    let tight_cluster_bonus = if unique_counterparties <= 3 && settlement_events.len() > 5 {
        0.5 * max_share
    } else {
        0.0
    };
    let suspicion = (concentration_penalty + tight_cluster_bonus).min(1.0);
    let collusion_multiplier = if suspicion > 0.3 {
        (1.0 - (suspicion - 0.3) * 0.5).max(0.0)
    } else {
        1.0
    };

    // Step 9: median success value, for value weighting.
    let mut success_values: Vec<f64> = successes.iter().map(|e| e.value).collect();
    success_values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median_success_value = median(&success_values);

    let recency_weight = |ts: i64| -> f64 {
        let age = (now_ms - ts) as f64;
        if age <= 0.0 {
            1.0
        } else {
            (-std::f64::consts::LN_2 * age / HALF_LIFE_MS).exp()
        }
    };

    let counterparty_weight = |counterparty: &SignerKey| -> f64 {
        match counterparty_scores.get(counterparty) {
            Some(cp_score) => (0.5 + cp_score / 200.0).clamp(0.5, 1.0),
            None => 0.5,
        }
    };

    let mut factors = Factors::default();
    let mut warnings = Vec::new();

    let mut weighted_success = 0.0;
    for event in &successes {
        let value_ratio = if median_success_value > 0.0 {
            (event.value / median_success_value).clamp(0.1, 10.0)
        } else {
            1.0
        };
        let weight = recency_weight(event.ts)
            * counterparty_weight(&event.counterparty_key)
            * wash_factor(&event.counterparty_key)
            * value_ratio;
        weighted_success += weight;
        factors.positive.push(Factor {
            factor: format!(
                "Success transaction with {}",
                event.counterparty_key
            ),
            weight,
        });
    }

    let mut weighted_failure = 0.0;
    for event in &failures {
        let severity = event
            .fault_domain
            .map(|d| d.base_severity())
            .unwrap_or(0.8)
            * event
                .failure_code
                .as_ref()
                .map(pact_types::family_multiplier)
                .unwrap_or(0.8);
        let weight = recency_weight(event.ts)
            * counterparty_weight(&event.counterparty_key)
            * wash_factor(&event.counterparty_key)
            * severity;
        weighted_failure += weight;
        factors.negative.push(Factor {
            factor: format!(
                "{} failure with {}",
                event
                    .failure_code
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                event.counterparty_key
            ),
            weight,
        });
    }

    let success_denom = weighted_success + weighted_failure;
    let success_component = if success_denom > 0.0 {
        100.0 * weighted_success / success_denom
    } else {
        100.0
    };
    let failure_component = if success_denom > 0.0 {
        100.0 * (1.0 - weighted_failure / success_denom)
    } else {
        100.0
    };

    // Step 8: dispute outcomes.
    let mut win_weight = 0.0;
    let mut loss_weight = 0.0;
    let mut dismiss_weight = 0.0;
    for event in &disputes {
        match event.dispute_outcome {
            Some(DisputeOutcome::Wins) => {
                win_weight += 1.0;
                factors.positive.push(Factor {
                    factor: format!("Dispute win against {}", event.counterparty_key),
                    weight: 1.0,
                });
            }
            Some(DisputeOutcome::Losses) => {
                loss_weight += 2.0;
                factors.negative.push(Factor {
                    factor: format!("Dispute loss against {}", event.counterparty_key),
                    weight: 2.0,
                });
            }
            Some(DisputeOutcome::Dismissed) | Some(DisputeOutcome::Split) => {
                dismiss_weight += 0.5;
            }
            None => {}
        }
    }
    let dispute_denom = win_weight + loss_weight + dismiss_weight;
    let dispute_component = if dispute_denom > 0.0 {
        100.0 * win_weight / dispute_denom
    } else {
        100.0
    };

    if unique_counterparties == 1 && settlement_events.len() >= 5 {
        warnings.push(format!(
            "High frequency of transactions with a single counterparty ({} events)",
            settlement_events.len()
        ));
    }

    let raw_score =
        0.5 * success_component + 0.3 * failure_component + 0.2 * dispute_component;
    let score = (raw_score * collusion_multiplier).clamp(0.0, 100.0);

    // Step 11: confidence.
    let total_events = events.len() as f64;
    let recent_count = events
        .iter()
        .filter(|e| (now_ms - e.ts) as f64 <= HALF_LIFE_MS)
        .count() as f64;
    let base_confidence = 0.4 * (total_events + 1.0).log10() / 100f64.log10()
        + 0.3 * (unique_counterparties as f64 / 10.0).min(1.0)
        + 0.3 * (recent_count / total_events.max(1.0));

    let recent_failure_frac = failures
        .iter()
        .filter(|e| (now_ms - e.ts) as f64 <= HALF_LIFE_MS)
        .count() as f64
        / total_events.max(1.0);
    let recent_dispute_frac = disputes
        .iter()
        .filter(|e| (now_ms - e.ts) as f64 <= HALF_LIFE_MS)
        .count() as f64
        / total_events.max(1.0);
    let failure_penalty = recent_failure_frac.min(0.3);
    let dispute_penalty = recent_dispute_frac.min(0.2);
    let confidence =
        (base_confidence * (1.0 - failure_penalty) * (1.0 - dispute_penalty)).clamp(0.0, 1.0);

    factors
        .positive
        .sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());
    factors
        .negative
        .sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());

    tracing::debug!(score, confidence, "computed passport score");

    PassportScoreResult {
        score,
        confidence,
        breakdown: ScoreBreakdown { factors, warnings },
        warning: None,
    }
}

fn median(sorted_values: &[f64]) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 0 {
        (sorted_values[mid - 1] + sorted_values[mid]) / 2.0
    } else {
        sorted_values[mid]
    }
}
