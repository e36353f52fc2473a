pub mod formatter;

pub use formatter::TraceFormatter;

use crate::circuit::{Condition, ConditionGroup, OperandType, Operator};
use crate::evaluator::TypedValue;

/// A record of how one rule was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    /// The resolved left-hand path.
    pub field: String,
    pub operator: Operator,
    pub operand_type: OperandType,
    /// The rule's raw `value` text (a literal or a path).
    pub operand: String,
    pub left: TypedValue,
    pub right: TypedValue,
    pub outcome: bool,
}

/// Outcome of a filter pin together with the traces of its rules.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    pub outcome: bool,
    pub condition: Condition,
    /// The combinator actually applied; `None` when there was a single rule.
    pub group: Option<ConditionGroup>,
    pub rules: Vec<RuleTrace>,
}

impl FilterReport {
    /// Human-readable explanation of the outcome.
    pub fn reason(&self) -> String {
        TraceFormatter::format_report(self)
    }
}
