//! Filter pin evaluation.
//!
//! Every rule of a pin is resolved against the sample-data context, compared with its
//! operator, and the outcomes are combined with the pin's condition group. The outer
//! condition (`Is`/`Not`) is applied last.

pub mod operand;
pub mod operator;
pub mod value;

pub use operand::{resolve_field, resolve_operand};
pub use value::{TypedValue, coerce_json, coerce_text};

use crate::circuit::{Condition, ConditionGroup, FilterPin, Rule};
use crate::error::EvaluationError;
use crate::json;
use crate::trace::{FilterReport, RuleTrace};
use serde_json::Value;
use tracing::debug;

pub const FILTER_PASSED: &str = "The filter condition is true. Data will pass through.";
pub const FILTER_BLOCKED: &str = "The filter condition is false. Data will be filtered out.";

/// Evaluates a filter pin against `context`.
pub fn evaluate(pin: &FilterPin, context: &Value) -> Result<bool, EvaluationError> {
    evaluate_with_trace(pin, context).map(|report| report.outcome)
}

/// Evaluates a filter pin and keeps the trace of every rule.
///
/// All rules are evaluated before combining, so an error in any rule is reported
/// even when an earlier rule would already decide the outcome.
pub fn evaluate_with_trace(
    pin: &FilterPin,
    context: &Value,
) -> Result<FilterReport, EvaluationError> {
    if pin.rules.is_empty() {
        return Err(EvaluationError::EmptyRuleSet);
    }

    let rules = pin
        .rules
        .iter()
        .map(|rule| evaluate_rule(rule, context))
        .collect::<Result<Vec<_>, _>>()?;

    // A single rule ignores any condition group that happens to be set.
    let (combined, group) = if rules.len() == 1 {
        (rules[0].outcome, None)
    } else {
        match pin.condition_group {
            Some(ConditionGroup::And) => (rules.iter().all(|r| r.outcome), pin.condition_group),
            Some(ConditionGroup::Or) => (rules.iter().any(|r| r.outcome), pin.condition_group),
            None => return Err(EvaluationError::MissingConditionGroup(rules.len())),
        }
    };

    let outcome = match pin.condition {
        Condition::Is => combined,
        Condition::Not => !combined,
    };

    Ok(FilterReport {
        outcome,
        condition: pin.condition,
        group,
        rules,
    })
}

/// Resolves both operands of `rule` and applies its operator.
pub fn evaluate_rule(rule: &Rule, context: &Value) -> Result<RuleTrace, EvaluationError> {
    let (field, left) = resolve_field(rule, context)?;
    let right = resolve_operand(rule, context)?;
    let outcome = operator::apply(rule.operator, rule.data_type, &left, &right)?;

    Ok(RuleTrace {
        field,
        operator: rule.operator,
        operand_type: rule.operand_type,
        operand: rule.value.clone(),
        left,
        right,
        outcome,
    })
}

/// Renders the preview text of a filter pin against its own stored sample data.
/// Parse and evaluation errors are returned as their message.
pub fn preview(pin: &FilterPin) -> String {
    match json::parse_sample_data(&pin.sample_data) {
        Ok(context) => preview_with_context(pin, &context),
        Err(e) => {
            debug!("filter sample data rejected: {}", e);
            e.to_string()
        }
    }
}

pub fn preview_with_context(pin: &FilterPin, context: &Value) -> String {
    match evaluate(pin, context) {
        Ok(true) => FILTER_PASSED.to_string(),
        Ok(false) => FILTER_BLOCKED.to_string(),
        Err(e) => {
            debug!("filter evaluated to error text: {}", e);
            e.to_string()
        }
    }
}
