//! v4 rule-tree evaluation (§4.5).

use crate::condition::evaluate_condition;
use pact_types::PolicyV4;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolatedRule {
    pub rule_name: String,
    pub failure_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub allowed: bool,
    pub violated_rules: Vec<ViolatedRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_failure_code: Option<String>,
    pub evidence_refs: Vec<String>,
}

const DEFAULT_FAILURE_CODE: &str = "PACT-101";

/// `evaluate(policy, context) → verdict`, per §4.5. Rules run in declared
/// order; every rule is evaluated (no short-circuit across rules) so the
/// full set of violations is always reported.
pub fn evaluate(policy: &PolicyV4, context: &Value) -> PolicyVerdict {
    let mut violated_rules = Vec::new();
    let mut evidence_refs = vec![format!("policy_id:{}", policy.policy_id)];

    for rule in &policy.rules {
        let passed = evaluate_condition(&rule.condition, context);
        if !passed {
            let failure_code = if rule.failure_code.is_empty() {
                DEFAULT_FAILURE_CODE.to_string()
            } else {
                rule.failure_code.clone()
            };
            evidence_refs.push(format!("policy_rule:{}", rule.name));
            violated_rules.push(ViolatedRule {
                rule_name: rule.name.clone(),
                failure_code,
            });
        }
    }

    let mapped_failure_code = violated_rules.first().map(|v| v.failure_code.clone());
    let allowed = violated_rules.is_empty();

    if !allowed {
        tracing::debug!(
            policy_id = %policy.policy_id,
            violations = violated_rules.len(),
            "policy evaluation rejected context"
        );
    }

    PolicyVerdict {
        allowed,
        violated_rules,
        mapped_failure_code,
        evidence_refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_types::{Condition, Operator, PolicyId, Rule, POLICY_V4_VERSION};
    use serde_json::json;

    fn sample_policy() -> PolicyV4 {
        PolicyV4 {
            policy_version: POLICY_V4_VERSION.to_string(),
            policy_id: PolicyId::from("p1"),
            rules: vec![
                Rule {
                    name: "max_price".to_string(),
                    condition: Condition::Leaf {
                        field: "intent.max_price".to_string(),
                        operator: Operator::Le,
                        value: json!(100.0),
                    },
                    failure_code: "PACT-101".to_string(),
                },
                Rule {
                    name: "allowed_counterparty".to_string(),
                    condition: Condition::Leaf {
                        field: "counterparty.tier".to_string(),
                        operator: Operator::NotIn,
                        value: json!(["C"]),
                    },
                    failure_code: "PACT-102".to_string(),
                },
            ],
        }
    }

    #[test]
    fn all_rules_pass_allows() {
        let policy = sample_policy();
        let context = json!({"intent": {"max_price": 50.0}, "counterparty": {"tier": "A"}});
        let verdict = evaluate(&policy, &context);
        assert!(verdict.allowed);
        assert!(verdict.violated_rules.is_empty());
    }

    #[test]
    fn violations_are_all_collected_not_short_circuited() {
        let policy = sample_policy();
        let context = json!({"intent": {"max_price": 999.0}, "counterparty": {"tier": "C"}});
        let verdict = evaluate(&policy, &context);
        assert!(!verdict.allowed);
        assert_eq!(verdict.violated_rules.len(), 2);
        assert_eq!(verdict.mapped_failure_code, Some("PACT-101".to_string()));
    }

    #[test]
    fn evidence_refs_include_policy_id_and_rule_names() {
        let policy = sample_policy();
        let context = json!({"intent": {"max_price": 999.0}, "counterparty": {"tier": "A"}});
        let verdict = evaluate(&policy, &context);
        assert!(verdict.evidence_refs.contains(&"policy_id:p1".to_string()));
        assert!(verdict
            .evidence_refs
            .contains(&"policy_rule:max_price".to_string()));
    }
}
