//! Condition tree evaluation (§4.5).

use crate::context::get_path;
use pact_types::{Condition, Operator};
use serde_json::Value;

/// Evaluate a condition tree against a context object. A leaf whose field
/// is absent is `false`, unless the operator is `NOT_IN` - absence is "not
/// a member" there.
pub fn evaluate_condition(condition: &Condition, context: &Value) -> bool {
    match condition {
        Condition::Leaf {
            field,
            operator,
            value,
        } => {
            let found = get_path(context, field);
            match found {
                None => *operator == Operator::NotIn,
                Some(found) => evaluate_leaf(*operator, found, value),
            }
        }
        Condition::And { conditions } => conditions.iter().all(|c| evaluate_condition(c, context)),
        Condition::Or { conditions } => conditions.iter().any(|c| evaluate_condition(c, context)),
        Condition::Not { condition } => !evaluate_condition(condition, context),
    }
}

fn evaluate_leaf(operator: Operator, found: &Value, expected: &Value) -> bool {
    match operator {
        Operator::Eq => found == expected,
        Operator::Ne => found != expected,
        Operator::Lt => numeric_cmp(found, expected, |a, b| a < b),
        Operator::Le => numeric_cmp(found, expected, |a, b| a <= b),
        Operator::Gt => numeric_cmp(found, expected, |a, b| a > b),
        Operator::Ge => numeric_cmp(found, expected, |a, b| a >= b),
        Operator::In => expected
            .as_array()
            .is_some_and(|items| items.iter().any(|item| item == found)),
        Operator::NotIn => !expected
            .as_array()
            .is_some_and(|items| items.iter().any(|item| item == found)),
    }
}

fn numeric_cmp(found: &Value, expected: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (found.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_absent_field_is_false_except_not_in() {
        let context = json!({});
        let leaf = Condition::Leaf {
            field: "missing".to_string(),
            operator: Operator::Eq,
            value: json!(1),
        };
        assert!(!evaluate_condition(&leaf, &context));

        let not_in = Condition::Leaf {
            field: "missing".to_string(),
            operator: Operator::NotIn,
            value: json!([1, 2]),
        };
        assert!(evaluate_condition(&not_in, &context));
    }

    #[test]
    fn and_short_circuits_false() {
        let context = json!({"a": 1});
        let cond = Condition::And {
            conditions: vec![
                Condition::Leaf {
                    field: "a".to_string(),
                    operator: Operator::Eq,
                    value: json!(2),
                },
                Condition::Leaf {
                    field: "missing".to_string(),
                    operator: Operator::Eq,
                    value: json!(1),
                },
            ],
        };
        assert!(!evaluate_condition(&cond, &context));
    }

    #[test]
    fn or_short_circuits_true() {
        let context = json!({"a": 1});
        let cond = Condition::Or {
            conditions: vec![
                Condition::Leaf {
                    field: "a".to_string(),
                    operator: Operator::Eq,
                    value: json!(1),
                },
                Condition::Leaf {
                    field: "nonexistent".to_string(),
                    operator: Operator::Eq,
                    value: json!(true),
                },
            ],
        };
        assert!(evaluate_condition(&cond, &context));
    }

    #[test]
    fn not_inverts() {
        let context = json!({"a": 1});
        let cond = Condition::Not {
            condition: Box::new(Condition::Leaf {
                field: "a".to_string(),
                operator: Operator::Eq,
                value: json!(1),
            }),
        };
        assert!(!evaluate_condition(&cond, &context));
    }

    #[test]
    fn in_compares_by_deep_equality() {
        let context = json!({"tier": "C"});
        let cond = Condition::Leaf {
            field: "tier".to_string(),
            operator: Operator::In,
            value: json!(["A", "B"]),
        };
        assert!(!evaluate_condition(&cond, &context));
    }

    #[test]
    fn ordering_operators_compare_numerically() {
        let context = json!({"price": 99.5});
        let cond = Condition::Leaf {
            field: "price".to_string(),
            operator: Operator::Le,
            value: json!(100.0),
        };
        assert!(evaluate_condition(&cond, &context));
    }
}
