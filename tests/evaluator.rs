//! Tests for filter evaluation and its preview text.
mod common;
use circuit_preview::evaluator::{FILTER_BLOCKED, FILTER_PASSED};
use circuit_preview::prelude::*;
use common::*;
use serde_json::json;

fn one_and_two() -> Vec<Rule> {
    vec![
        rule("one", Operator::Equal, "1", DataType::Number),
        rule("one", Operator::Equal, "2", DataType::Number),
    ]
}

fn context() -> serde_json::Value {
    json!({
        "one": 1,
        "Node:0": {"user": {"name": "Ada", "age": 30, "roles": ["admin", "dev"]}},
        "Node:1": {"Canister": {"balance": "250", "limit": 100, "owner": "Ada"}}
    })
}

#[test]
fn test_and_or_groups() {
    let and = filter_pin(Condition::Is, Some(ConditionGroup::And), one_and_two());
    let or = filter_pin(Condition::Is, Some(ConditionGroup::Or), one_and_two());

    assert!(!evaluator::evaluate(&and, &context()).unwrap());
    assert!(evaluator::evaluate(&or, &context()).unwrap());
}

#[test]
fn test_not_inverts_groups() {
    let not_and = filter_pin(Condition::Not, Some(ConditionGroup::And), one_and_two());
    let not_or = filter_pin(Condition::Not, Some(ConditionGroup::Or), one_and_two());

    assert!(evaluator::evaluate(&not_and, &context()).unwrap());
    assert!(!evaluator::evaluate(&not_or, &context()).unwrap());
}

#[test]
fn test_single_rule_ignores_group() {
    let rules = vec![rule("Node:0.user.age", Operator::GreaterThan, "18", DataType::Number)];
    let with_group = filter_pin(Condition::Is, Some(ConditionGroup::Or), rules.clone());
    let without_group = filter_pin(Condition::Is, None, rules);

    let report = evaluator::evaluate_with_trace(&with_group, &context()).unwrap();
    assert!(report.outcome);
    assert_eq!(report.group, None);
    assert!(evaluator::evaluate(&without_group, &context()).unwrap());
}

#[test]
fn test_missing_group_with_many_rules() {
    let pin = filter_pin(Condition::Is, None, one_and_two());
    assert!(matches!(
        evaluator::evaluate(&pin, &context()),
        Err(EvaluationError::MissingConditionGroup(2))
    ));
}

#[test]
fn test_empty_rule_set() {
    let pin = filter_pin(Condition::Is, Some(ConditionGroup::And), vec![]);
    assert!(matches!(
        evaluator::evaluate(&pin, &context()),
        Err(EvaluationError::EmptyRuleSet)
    ));
}

#[test]
fn test_string_coerced_sample_values_compare_numerically() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule(
            "Node:1.Canister.balance",
            Operator::GreaterThanOrEqual,
            "250",
            DataType::Number,
        )],
    );
    assert!(evaluator::evaluate(&pin, &context()).unwrap());
}

#[test]
fn test_bigint_ordering() {
    let ctx = json!({"supply": "123456789012345678901234567890"});
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule(
            "supply",
            Operator::GreaterThan,
            "123456789012345678901234567889",
            DataType::BigInt,
        )],
    );
    assert!(evaluator::evaluate(&pin, &ctx).unwrap());
}

#[test]
fn test_field_operand_compares_two_paths() {
    let pin = filter_pin(
        Condition::Is,
        Some(ConditionGroup::And),
        vec![
            field_rule(
                "Node:1.Canister.balance",
                Operator::GreaterThan,
                "Node:1.Canister.limit",
                DataType::Number,
            ),
            field_rule(
                "Node:0.user.name",
                Operator::Equal,
                "Node:1.Canister.owner",
                DataType::String,
            ),
        ],
    );
    let report = evaluator::evaluate_with_trace(&pin, &context()).unwrap();
    assert!(report.outcome);
    assert_eq!(
        report.reason(),
        "Node:1.Canister.balance (was 250) > Node:1.Canister.limit (was 100) AND \
         Node:0.user.name (was \"Ada\") == Node:1.Canister.owner (was \"Ada\")"
    );
}

#[test]
fn test_value_operand_may_be_a_template() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule(
            "Node:0.user.name",
            Operator::Equal,
            "{{Node:1.Canister.owner}}",
            DataType::String,
        )],
    );
    assert!(evaluator::evaluate(&pin, &context()).unwrap());
}

#[test]
fn test_contains_on_strings_and_arrays() {
    let on_string = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:0.user.name", Operator::Contains, "d", DataType::String)],
    );
    let on_array = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:0.user.roles", Operator::Contains, "admin", DataType::String)],
    );
    assert!(evaluator::evaluate(&on_string, &context()).unwrap());
    assert!(evaluator::evaluate(&on_array, &context()).unwrap());
}

#[test]
fn test_in_and_not_in_lists() {
    let in_list = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:0.user.age", Operator::In, "18, 30, 42", DataType::Number)],
    );
    let not_in_json = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:0.user.name", Operator::NotIn, r#"["Bob", "Eve"]"#, DataType::String)],
    );
    assert!(evaluator::evaluate(&in_list, &context()).unwrap());
    assert!(evaluator::evaluate(&not_in_json, &context()).unwrap());
}

#[test]
fn test_in_with_scalar_field_is_rejected() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![field_rule("one", Operator::In, "Node:0.user.age", DataType::Number)],
    );
    assert!(matches!(
        evaluator::evaluate(&pin, &context()),
        Err(EvaluationError::NotACollection { operator: Operator::In, .. })
    ));
}

#[test]
fn test_ordering_on_strings_is_a_mismatch() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:0.user.name", Operator::LessThan, "Bob", DataType::String)],
    );
    assert!(matches!(
        evaluator::evaluate(&pin, &context()),
        Err(EvaluationError::OperatorMismatch { data_type: DataType::String, .. })
    ));
}

#[test]
fn test_missing_field_is_reported() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule("Node:2.anything", Operator::Equal, "x", DataType::String)],
    );
    let err = evaluator::evaluate(&pin, &context()).unwrap_err();
    assert!(matches!(err, EvaluationError::FieldNotFound(ref path) if path == "Node:2.anything"));
}

#[test]
fn test_errors_in_later_rules_are_not_masked() {
    let pin = filter_pin(
        Condition::Is,
        Some(ConditionGroup::Or),
        vec![
            rule("one", Operator::Equal, "1", DataType::Number),
            rule("one", Operator::Equal, "abc", DataType::Number),
        ],
    );
    assert!(matches!(
        evaluator::evaluate(&pin, &context()),
        Err(EvaluationError::Coercion(_))
    ));
}

#[test]
fn test_preview_texts() {
    let mut pin = filter_pin(
        Condition::Is,
        None,
        vec![rule("age", Operator::GreaterThan, "18", DataType::Number)],
    );

    pin.sample_data = r#"{"age": 30}"#.to_string();
    assert_eq!(evaluator::preview(&pin), FILTER_PASSED);
    assert_eq!(
        evaluator::preview(&pin),
        "The filter condition is true. Data will pass through."
    );

    pin.sample_data = r#"{"age": 12}"#.to_string();
    assert_eq!(
        evaluator::preview(&pin),
        "The filter condition is false. Data will be filtered out."
    );
    assert_eq!(evaluator::preview(&pin), FILTER_BLOCKED);

    pin.sample_data = "{broken".to_string();
    assert!(evaluator::preview(&pin).starts_with("Failed to parse sample data"));

    pin.sample_data = r#"{"age": "old"}"#.to_string();
    assert_eq!(
        evaluator::preview(&pin),
        "Cannot convert 'old' to Number: not a number"
    );
}

#[test]
fn test_not_reason_wraps_group() {
    let pin = filter_pin(Condition::Not, Some(ConditionGroup::Or), one_and_two());
    let report = evaluator::evaluate_with_trace(&pin, &context()).unwrap();
    assert_eq!(report.reason(), "NOT (one (was 1) == 1 OR one (was 1) == 2)");
    assert_eq!(
        TraceFormatter::format_rule(&report.rules[1]),
        "one (was 1) == 2"
    );
}

const LEDGER: &str = "ryjl3-tyaaa-aaaaa-aaaba-cai";
const MANAGEMENT: &str = "aaaaa-aa";

fn typed_context() -> serde_json::Value {
    json!({
        "age": 30,
        "active": true,
        "flag": "false",
        "count": 42,
        "supply": "123456789012345678901234567890",
        "owner": LEDGER,
        "caller": LEDGER,
        "controller": MANAGEMENT
    })
}

/// Evaluates a single literal rule against [`typed_context`].
fn check(field: &str, operator: Operator, value: &str, data_type: DataType) -> bool {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule(field, operator, value, data_type)],
    );
    evaluator::evaluate(&pin, &typed_context()).unwrap()
}

fn check_fields(field: &str, operator: Operator, other: &str, data_type: DataType) -> bool {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![field_rule(field, operator, other, data_type)],
    );
    evaluator::evaluate(&pin, &typed_context()).unwrap()
}

#[test]
fn test_number_comparisons() {
    assert!(check("age", Operator::NotEqual, "31", DataType::Number));
    assert!(!check("age", Operator::NotEqual, "30", DataType::Number));
    assert!(check("age", Operator::Equal, "30.0", DataType::Number));

    assert!(check("age", Operator::LessThan, "31", DataType::Number));
    assert!(!check("age", Operator::LessThan, "30", DataType::Number));
    assert!(check("age", Operator::LessThanOrEqual, "30", DataType::Number));
    assert!(!check("age", Operator::LessThanOrEqual, "29.5", DataType::Number));
    assert!(!check("age", Operator::GreaterThan, "30", DataType::Number));
    assert!(check("age", Operator::GreaterThanOrEqual, "-1e3", DataType::Number));
}

#[test]
fn test_bigint_comparisons() {
    let just_below = "123456789012345678901234567889";
    let exact = "123456789012345678901234567890";

    assert!(check("supply", Operator::Equal, exact, DataType::BigInt));
    assert!(check("supply", Operator::NotEqual, just_below, DataType::BigInt));
    assert!(!check("supply", Operator::LessThan, exact, DataType::BigInt));
    assert!(check("supply", Operator::LessThanOrEqual, exact, DataType::BigInt));
    assert!(check("supply", Operator::GreaterThanOrEqual, exact, DataType::BigInt));
    assert!(!check("supply", Operator::GreaterThan, exact, DataType::BigInt));

    assert!(check("count", Operator::Equal, "42", DataType::BigInt));
    assert!(check("count", Operator::GreaterThan, "-7", DataType::BigInt));
    assert!(check("count", Operator::LessThan, just_below, DataType::BigInt));
    assert!(check_fields("count", Operator::LessThan, "supply", DataType::BigInt));
}

#[test]
fn test_boolean_equality() {
    assert!(check("active", Operator::Equal, "true", DataType::Boolean));
    assert!(check("active", Operator::NotEqual, "false", DataType::Boolean));
    assert!(!check("active", Operator::Equal, "false", DataType::Boolean));
    assert!(check("flag", Operator::Equal, "false", DataType::Boolean));
    assert!(check_fields("active", Operator::NotEqual, "flag", DataType::Boolean));
}

#[test]
fn test_boolean_mismatches() {
    let capitalised = filter_pin(
        Condition::Is,
        None,
        vec![rule("active", Operator::Equal, "True", DataType::Boolean)],
    );
    assert!(matches!(
        evaluator::evaluate(&capitalised, &typed_context()),
        Err(EvaluationError::Coercion(ref e)) if e.data_type == DataType::Boolean
    ));

    let numeric_field = filter_pin(
        Condition::Is,
        None,
        vec![rule("age", Operator::Equal, "true", DataType::Boolean)],
    );
    assert!(matches!(
        evaluator::evaluate(&numeric_field, &typed_context()),
        Err(EvaluationError::Coercion(_))
    ));

    let ordered = filter_pin(
        Condition::Is,
        None,
        vec![rule("active", Operator::GreaterThan, "false", DataType::Boolean)],
    );
    assert!(matches!(
        evaluator::evaluate(&ordered, &typed_context()),
        Err(EvaluationError::OperatorMismatch { data_type: DataType::Boolean, .. })
    ));
}

#[test]
fn test_principal_equality_uses_canonical_text() {
    assert!(check("owner", Operator::Equal, LEDGER, DataType::Principal));
    assert!(check("owner", Operator::Equal, &format!("  {}  ", LEDGER), DataType::Principal));
    assert!(check("owner", Operator::NotEqual, MANAGEMENT, DataType::Principal));
    let both = format!("{}, {}", MANAGEMENT, LEDGER);
    assert!(check("owner", Operator::In, &both, DataType::Principal));

    assert!(check_fields("owner", Operator::Equal, "caller", DataType::Principal));
    assert!(!check_fields("owner", Operator::Equal, "controller", DataType::Principal));
    assert!(check_fields("controller", Operator::NotEqual, "caller", DataType::Principal));
}

#[test]
fn test_invalid_principal_operand_is_rejected() {
    let pin = filter_pin(
        Condition::Is,
        None,
        vec![rule("owner", Operator::Equal, "not-a-principal", DataType::Principal)],
    );
    assert!(matches!(
        evaluator::evaluate(&pin, &typed_context()),
        Err(EvaluationError::Coercion(ref e)) if e.data_type == DataType::Principal
    ));
}
