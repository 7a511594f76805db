//! Policy document shapes: the v4 rule tree and the legacy v1 staged guard
//! (§3, §4.5). Evaluation lives in `pact-policy`; this crate holds only the
//! wire shapes both versions are built from.

use crate::PolicyId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators available to a v4 leaf condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT_IN")]
    NotIn,
}

/// A node in the v4 policy condition tree. Grounded on the `All`/`Any`/`Not`
/// recursive-requirement shape; leaves compare a dotted field path against a
/// literal with one [`Operator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Leaf {
        field: String,
        operator: Operator,
        value: Value,
    },
    And {
        conditions: Vec<Condition>,
    },
    Or {
        conditions: Vec<Condition>,
    },
    Not {
        condition: Box<Condition>,
    },
}

/// One named rule: a condition tree plus the failure code to raise when it
/// matches a disallowed case (evaluation semantics live in `pact-policy`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub condition: Condition,
    pub failure_code: String,
}

/// A v4 policy document: an ordered list of rules evaluated against an
/// intent/transcript context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyV4 {
    pub policy_version: String,
    pub policy_id: PolicyId,
    pub rules: Vec<Rule>,
}

/// The six fixed phases of the legacy v1 staged guard (§4.5's table), in
/// evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyV1Phase {
    Identity,
    Intent,
    Negotiation,
    Lock,
    Exchange,
    Resolution,
}

impl PolicyV1Phase {
    pub const ORDER: [PolicyV1Phase; 6] = [
        PolicyV1Phase::Identity,
        PolicyV1Phase::Intent,
        PolicyV1Phase::Negotiation,
        PolicyV1Phase::Lock,
        PolicyV1Phase::Exchange,
        PolicyV1Phase::Resolution,
    ];
}

// --- v1 phase configuration -------------------------------------------
//
// Unlike v4, v1 is "a richer structured policy (not an interpreted
// rule-tree)" (spec.md's §4.5 wording): each phase's checks are concrete,
// typed business rules - a bond formula, a clock-skew window, rate
// thresholds - rather than leaves of a generic condition tree. A document
// author configures thresholds and allow-lists per phase; the engine in
// `pact-policy` supplies the arithmetic.
//
// Default values disable a check (empty allow-lists admit everything,
// numeric caps sit at a value no real input can exceed) so a document that
// only sets a handful of fields still type-checks as a complete policy.

fn unrestricted_rate() -> f64 {
    1.0
}

fn unrestricted_cap() -> f64 {
    f64::MAX
}

fn unrestricted_duration_ms() -> i64 {
    i64::MAX
}

fn unrestricted_count() -> u32 {
    u32::MAX
}

/// identity phase (§4.5 table row 1): new-agent exclusion, region
/// allow-list, failure/timeout rate ceilings, required credentials,
/// trusted-issuer constraint, passport-v1 floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityPhaseConfig {
    #[serde(default)]
    pub exclude_new_agents: bool,
    #[serde(default)]
    pub allowed_regions: Vec<String>,
    #[serde(default = "unrestricted_rate")]
    pub max_failure_rate: f64,
    #[serde(default = "unrestricted_rate")]
    pub max_timeout_rate: f64,
    #[serde(default)]
    pub required_credentials: Vec<String>,
    #[serde(default)]
    pub trusted_issuers: Vec<String>,
    #[serde(default)]
    pub min_passport_score: Option<f64>,
    #[serde(default)]
    pub min_passport_confidence: Option<f64>,
}

impl Default for IdentityPhaseConfig {
    fn default() -> Self {
        Self {
            exclude_new_agents: false,
            allowed_regions: Vec::new(),
            max_failure_rate: unrestricted_rate(),
            max_timeout_rate: unrestricted_rate(),
            required_credentials: Vec::new(),
            trusted_issuers: Vec::new(),
            min_passport_score: None,
            min_passport_confidence: None,
        }
    }
}

/// intent phase (§4.5 table row 2): expiry/clock-skew time semantics,
/// admission (allowlist, spend cap, one-of proof), runtime rate/concurrency/
/// budget/kill-switch flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPhaseConfig {
    #[serde(default)]
    pub require_expiry: bool,
    #[serde(default = "unrestricted_duration_ms")]
    pub max_valid_for_ms: i64,
    #[serde(default = "unrestricted_duration_ms")]
    pub max_clock_skew_ms: i64,
    #[serde(default)]
    pub intent_allowlist: Vec<String>,
    #[serde(default = "unrestricted_cap")]
    pub session_spend_cap_usd: f64,
    #[serde(default)]
    pub require_admission_proof: bool,
    #[serde(default = "unrestricted_count")]
    pub max_rate_per_window: u32,
    #[serde(default = "unrestricted_count")]
    pub max_concurrent: u32,
    #[serde(default = "unrestricted_cap")]
    pub budget_cap_usd: f64,
}

impl Default for IntentPhaseConfig {
    fn default() -> Self {
        Self {
            require_expiry: false,
            max_valid_for_ms: unrestricted_duration_ms(),
            max_clock_skew_ms: i64::MAX,
            intent_allowlist: Vec::new(),
            session_spend_cap_usd: unrestricted_cap(),
            require_admission_proof: false,
            max_rate_per_window: u32::MAX,
            max_concurrent: u32::MAX,
            budget_cap_usd: unrestricted_cap(),
        }
    }
}

/// negotiation phase (§4.5 table row 3): round ceiling (new-agent adjusted),
/// duration ceiling, firm-quote freshness, reference-price band, counterparty
/// passport floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationPhaseConfig {
    #[serde(default = "unrestricted_count")]
    pub max_rounds: u32,
    #[serde(default)]
    pub new_agent_round_penalty: u32,
    #[serde(default = "unrestricted_duration_ms")]
    pub max_duration_ms: i64,
    #[serde(default = "unrestricted_duration_ms")]
    pub firm_quote_max_valid_for_ms: i64,
    #[serde(default = "unrestricted_rate")]
    pub reference_band_pct: f64,
    #[serde(default)]
    pub min_counterparty_passport_score: Option<f64>,
}

impl Default for NegotiationPhaseConfig {
    fn default() -> Self {
        Self {
            max_rounds: u32::MAX,
            new_agent_round_penalty: 0,
            max_duration_ms: unrestricted_duration_ms(),
            firm_quote_max_valid_for_ms: unrestricted_duration_ms(),
            reference_band_pct: unrestricted_rate(),
            min_counterparty_passport_score: None,
        }
    }
}

/// lock phase (§4.5 table row 4): settlement-mode allow-list,
/// pre-settlement lock requirement, the bond formula
/// `seller_bond >= max(price * bond_multiple * new_agent_multiplier, min_bond)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockPhaseConfig {
    #[serde(default)]
    pub allowed_settlement_modes: Vec<String>,
    #[serde(default)]
    pub require_pre_settlement_lock: bool,
    #[serde(default = "default_bond_multiple")]
    pub bond_multiple: f64,
    #[serde(default = "default_bond_multiple")]
    pub new_agent_bond_multiplier: f64,
    #[serde(default)]
    pub min_bond_usd: f64,
}

fn default_bond_multiple() -> f64 {
    1.0
}

impl Default for LockPhaseConfig {
    fn default() -> Self {
        Self {
            allowed_settlement_modes: Vec::new(),
            require_pre_settlement_lock: false,
            bond_multiple: default_bond_multiple(),
            new_agent_bond_multiplier: default_bond_multiple(),
            min_bond_usd: 0.0,
        }
    }
}

/// exchange phase (§4.5 table row 5): schema validation, streaming spend
/// cap, SLA latency/freshness ceilings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangePhaseConfig {
    #[serde(default)]
    pub require_schema_validation: bool,
    #[serde(default = "unrestricted_cap")]
    pub streaming_spend_cap_usd: f64,
    #[serde(default = "unrestricted_duration_ms")]
    pub sla_max_latency_ms: i64,
    #[serde(default = "unrestricted_duration_ms")]
    pub sla_max_freshness_ms: i64,
}

impl Default for ExchangePhaseConfig {
    fn default() -> Self {
        Self {
            require_schema_validation: false,
            streaming_spend_cap_usd: unrestricted_cap(),
            sla_max_latency_ms: unrestricted_duration_ms(),
            sla_max_freshness_ms: unrestricted_duration_ms(),
        }
    }
}

/// resolution phase (§4.5 table row 6): whether transcript storage (and
/// therefore receipt emission) is suppressed. Not a pass/fail gate - it
/// flags a side effect for the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionPhaseConfig {
    #[serde(default)]
    pub suppress_transcript_storage: bool,
}

/// All six phases' configuration, in the fixed evaluation order of
/// [`PolicyV1Phase::ORDER`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyV1Phases {
    #[serde(default)]
    pub identity: IdentityPhaseConfig,
    #[serde(default)]
    pub intent: IntentPhaseConfig,
    #[serde(default)]
    pub negotiation: NegotiationPhaseConfig,
    #[serde(default)]
    pub lock: LockPhaseConfig,
    #[serde(default)]
    pub exchange: ExchangePhaseConfig,
    #[serde(default)]
    pub resolution: ResolutionPhaseConfig,
}

/// A v1 policy document: a fixed six-phase pipeline, each phase independently
/// configured with typed thresholds rather than a generic condition tree.
/// Coexists with [`PolicyV4`] per the version tag on the wire (see
/// `DESIGN.md` for the coexistence decision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyV1 {
    pub policy_version: String,
    pub policy_id: PolicyId,
    pub phases: PolicyV1Phases,
}
