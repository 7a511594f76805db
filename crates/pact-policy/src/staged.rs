//! v1 legacy staged guard (§4.5's six-phase table).
//!
//! Resolves §9's "policy v1 vs v4 coexistence" open question by keeping v1
//! and v4 as two independent evaluators rather than forcing v1's business
//! rules through v4's generic condition tree (see `DESIGN.md`): v1 is, per
//! spec wording, "a richer structured policy (not an interpreted
//! rule-tree)" - each check below is a concrete formula over typed facts
//! (a bond multiple, a clock-skew window, a rate ceiling), not a leaf
//! comparison against a caller-supplied literal.

use pact_types::{
    ExchangePhaseConfig, IdentityPhaseConfig, IntentPhaseConfig, LockPhaseConfig,
    NegotiationPhaseConfig, PolicyV1, PolicyV1Phase, ResolutionPhaseConfig,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedFailure {
    pub phase: PolicyV1Phase,
    pub check_name: String,
    pub failure_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedVerdict {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StagedFailure>,
    /// Resolution phase's side effect (§4.5: "receipts can be silently
    /// suppressed"), independent of `allowed`.
    pub suppress_transcript_storage: bool,
    pub evidence_refs: Vec<String>,
}

/// Facts about the identity phase's subject, aggregated by the caller from
/// live counters (not the engine's job to go fetch them).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentityFacts<'a> {
    pub region: &'a str,
    pub total_attempts: u32,
    pub failed_attempts: u32,
    pub timed_out_attempts: u32,
    pub credentials_present: &'a [String],
    pub issuer: Option<&'a str>,
    pub passport_score: Option<f64>,
    pub passport_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntentFacts<'a> {
    pub expires_at_ms: Option<i64>,
    pub now_ms: i64,
    pub valid_for_ms: i64,
    pub counterparty_clock_ms: i64,
    pub intent_type: &'a str,
    pub session_spend_usd: f64,
    pub has_bond_proof: bool,
    pub has_credential_proof: bool,
    pub has_sponsor_proof: bool,
    pub rate_count: u32,
    pub concurrent_count: u32,
    pub budget_used_usd: f64,
    pub kill_switch_engaged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationFacts {
    pub round: u32,
    pub elapsed_ms: i64,
    pub firm_quote_valid_for_ms: Option<i64>,
    pub reference_price: f64,
    pub quoted_price: f64,
    pub urgent_override: bool,
    pub counterparty_passport_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockFacts<'a> {
    pub settlement_mode: &'a str,
    pub pre_settlement_lock_present: bool,
    pub price_usd: f64,
    pub seller_bond_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeFacts {
    pub schema_valid: bool,
    pub streaming_spend_usd: f64,
    pub latency_ms: i64,
    pub freshness_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionFacts {
    pub storage_requested: bool,
}

/// Every fact the six phases need, assembled by the caller from a
/// transcript plus whatever identity/counterparty state it already holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct V1Context<'a> {
    pub new_agent: bool,
    pub identity: IdentityFacts<'a>,
    pub intent: IntentFacts<'a>,
    pub negotiation: NegotiationFacts,
    pub lock: LockFacts<'a>,
    pub exchange: ExchangeFacts,
    pub resolution: ResolutionFacts,
}

fn rate(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn check_identity(config: &IdentityPhaseConfig, facts: &IdentityFacts, new_agent: bool) -> Option<(&'static str, &'static str)> {
    if config.exclude_new_agents && new_agent {
        return Some(("new_agent_excluded", "PACT-110"));
    }
    if !config.allowed_regions.is_empty() && !config.allowed_regions.iter().any(|r| r == facts.region) {
        return Some(("region_allow_list", "PACT-111"));
    }
    if rate(facts.failed_attempts, facts.total_attempts) > config.max_failure_rate {
        return Some(("failure_rate", "PACT-112"));
    }
    if rate(facts.timed_out_attempts, facts.total_attempts) > config.max_timeout_rate {
        return Some(("timeout_rate", "PACT-113"));
    }
    if !config
        .required_credentials
        .iter()
        .all(|required| facts.credentials_present.iter().any(|held| held == required))
    {
        return Some(("required_credentials", "PACT-114"));
    }
    if !config.trusted_issuers.is_empty() {
        let trusted = facts.issuer.is_some_and(|iss| config.trusted_issuers.iter().any(|t| t == iss));
        if !trusted {
            return Some(("trusted_issuer", "PACT-115"));
        }
    }
    if let Some(min_score) = config.min_passport_score {
        if facts.passport_score.map_or(true, |s| s < min_score) {
            return Some(("passport_v1_floor", "PACT-116"));
        }
    }
    if let Some(min_confidence) = config.min_passport_confidence {
        if facts.passport_confidence.map_or(true, |c| c < min_confidence) {
            return Some(("passport_v1_floor", "PACT-116"));
        }
    }
    None
}

fn check_intent(config: &IntentPhaseConfig, facts: &IntentFacts) -> Option<(&'static str, &'static str)> {
    if config.require_expiry && facts.expires_at_ms.is_none() {
        return Some(("expiry_presence", "PACT-120"));
    }
    if let Some(expires_at_ms) = facts.expires_at_ms {
        if expires_at_ms <= facts.now_ms {
            return Some(("expiry_not_elapsed", "PACT-121"));
        }
    }
    if facts.valid_for_ms > config.max_valid_for_ms {
        return Some(("valid_for_range", "PACT-122"));
    }
    if (facts.now_ms - facts.counterparty_clock_ms).abs() > config.max_clock_skew_ms {
        return Some(("clock_skew", "PACT-123"));
    }
    if !config.intent_allowlist.is_empty() && !config.intent_allowlist.iter().any(|t| t == facts.intent_type) {
        return Some(("intent_allowlist", "PACT-124"));
    }
    if facts.session_spend_usd > config.session_spend_cap_usd {
        return Some(("session_spend_cap", "PACT-125"));
    }
    if config.require_admission_proof
        && !(facts.has_bond_proof || facts.has_credential_proof || facts.has_sponsor_proof)
    {
        return Some(("admission_proof", "PACT-126"));
    }
    if facts.rate_count > config.max_rate_per_window {
        return Some(("runtime_rate", "PACT-127"));
    }
    if facts.concurrent_count > config.max_concurrent {
        return Some(("runtime_concurrency", "PACT-128"));
    }
    if facts.budget_used_usd > config.budget_cap_usd {
        return Some(("runtime_budget", "PACT-129"));
    }
    if facts.kill_switch_engaged {
        return Some(("kill_switch", "PACT-130"));
    }
    None
}

fn check_negotiation(
    config: &NegotiationPhaseConfig,
    facts: &NegotiationFacts,
    new_agent: bool,
) -> Option<(&'static str, &'static str)> {
    let effective_max_rounds = if new_agent {
        config.max_rounds.saturating_sub(config.new_agent_round_penalty)
    } else {
        config.max_rounds
    };
    if facts.round > effective_max_rounds {
        return Some(("max_rounds", "PACT-131"));
    }
    if facts.elapsed_ms > config.max_duration_ms {
        return Some(("max_duration", "PACT-132"));
    }
    match facts.firm_quote_valid_for_ms {
        None => return Some(("firm_quote_freshness", "PACT-133")),
        Some(valid_for_ms) if valid_for_ms > config.firm_quote_max_valid_for_ms => {
            return Some(("firm_quote_freshness", "PACT-133"));
        }
        _ => {}
    }
    if !facts.urgent_override && facts.reference_price > 0.0 {
        let drift = (facts.quoted_price - facts.reference_price).abs() / facts.reference_price;
        if drift > config.reference_band_pct {
            return Some(("reference_band", "PACT-134"));
        }
    }
    if let Some(min_score) = config.min_counterparty_passport_score {
        if facts.counterparty_passport_score.map_or(true, |s| s < min_score) {
            return Some(("counterparty_passport_v1", "PACT-135"));
        }
    }
    None
}

fn check_lock(config: &LockPhaseConfig, facts: &LockFacts, new_agent: bool) -> Option<(&'static str, &'static str)> {
    if !config.allowed_settlement_modes.is_empty()
        && !config.allowed_settlement_modes.iter().any(|m| m == facts.settlement_mode)
    {
        return Some(("settlement_mode_allow_list", "PACT-140"));
    }
    if config.require_pre_settlement_lock && !facts.pre_settlement_lock_present {
        return Some(("pre_settlement_lock", "PACT-141"));
    }
    let new_agent_multiplier = if new_agent { config.new_agent_bond_multiplier } else { 1.0 };
    let required_bond = (facts.price_usd * config.bond_multiple * new_agent_multiplier).max(config.min_bond_usd);
    if facts.seller_bond_usd < required_bond {
        return Some(("seller_bond", "PACT-142"));
    }
    None
}

fn check_exchange(config: &ExchangePhaseConfig, facts: &ExchangeFacts) -> Option<(&'static str, &'static str)> {
    if config.require_schema_validation && !facts.schema_valid {
        return Some(("schema_validation", "PACT-150"));
    }
    if facts.streaming_spend_usd > config.streaming_spend_cap_usd {
        return Some(("streaming_spend_cap", "PACT-151"));
    }
    if facts.latency_ms > config.sla_max_latency_ms {
        return Some(("sla_latency", "PACT-152"));
    }
    if facts.freshness_ms > config.sla_max_freshness_ms {
        return Some(("sla_freshness", "PACT-153"));
    }
    None
}

/// Resolution has no pass/fail check (§4.5: "transcript storage forbidden
/// when policy says so (receipts can be silently suppressed)") - it only
/// flags a side effect for the caller.
fn resolution_suppresses_storage(config: &ResolutionPhaseConfig, facts: &ResolutionFacts) -> bool {
    config.suppress_transcript_storage && facts.storage_requested
}

/// Walk the six phases in fixed order; within a phase, checks fire in
/// documented order. The first failing check across the whole walk wins and
/// halts evaluation (later phases assume earlier ones already passed).
pub fn evaluate_staged(policy: &PolicyV1, context: &V1Context) -> StagedVerdict {
    let mut evidence_refs = vec![format!("policy_id:{}", policy.policy_id)];

    macro_rules! fire {
        ($phase:expr, $check:expr) => {
            if let Some((name, code)) = $check {
                evidence_refs.push(format!("policy_rule:{name}"));
                tracing::debug!(
                    policy_id = %policy.policy_id,
                    phase = ?$phase,
                    check = name,
                    "staged policy guard rejected context"
                );
                return StagedVerdict {
                    allowed: false,
                    failure: Some(StagedFailure {
                        phase: $phase,
                        check_name: name.to_string(),
                        failure_code: code.to_string(),
                    }),
                    suppress_transcript_storage: false,
                    evidence_refs,
                };
            }
        };
    }

    evidence_refs.push("phase:identity".to_string());
    fire!(
        PolicyV1Phase::Identity,
        check_identity(&policy.phases.identity, &context.identity, context.new_agent)
    );
    evidence_refs.push("phase:intent".to_string());
    fire!(PolicyV1Phase::Intent, check_intent(&policy.phases.intent, &context.intent));
    evidence_refs.push("phase:negotiation".to_string());
    fire!(
        PolicyV1Phase::Negotiation,
        check_negotiation(&policy.phases.negotiation, &context.negotiation, context.new_agent)
    );
    evidence_refs.push("phase:lock".to_string());
    fire!(
        PolicyV1Phase::Lock,
        check_lock(&policy.phases.lock, &context.lock, context.new_agent)
    );
    evidence_refs.push("phase:exchange".to_string());
    fire!(PolicyV1Phase::Exchange, check_exchange(&policy.phases.exchange, &context.exchange));

    let suppress_transcript_storage =
        resolution_suppresses_storage(&policy.phases.resolution, &context.resolution);

    StagedVerdict {
        allowed: true,
        failure: None,
        suppress_transcript_storage,
        evidence_refs,
    }
}
