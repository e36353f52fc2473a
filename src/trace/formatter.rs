use super::{FilterReport, RuleTrace};
use crate::circuit::{Condition, ConditionGroup, OperandType};
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a filter report, e.g. `NOT (Node:0.age (was 30) > 18 AND ...)`.
    pub fn format_report(report: &FilterReport) -> String {
        let separator = match report.group {
            Some(ConditionGroup::And) => " AND ",
            Some(ConditionGroup::Or) => " OR ",
            None => "",
        };
        let body = report.rules.iter().map(Self::format_rule).join(separator);

        match report.condition {
            Condition::Is => body,
            Condition::Not if report.rules.len() > 1 => format!("NOT ({})", body),
            Condition::Not => format!("NOT {}", body),
        }
    }

    /// Format a single rule with the values its operands resolved to.
    pub fn format_rule(rule: &RuleTrace) -> String {
        let right = match rule.operand_type {
            OperandType::Value => rule.right.to_string(),
            OperandType::Field => format!("{} (was {})", rule.operand, rule.right),
        };
        format!(
            "{} (was {}) {} {}",
            rule.field, rule.left, rule.operator, right
        )
    }
}
