use super::value::TypedValue;
use crate::circuit::{DataType, Operator};
use crate::error::EvaluationError;
use std::cmp::Ordering;

/// Applies `operator` to two coerced operands.
pub fn apply(
    operator: Operator,
    data_type: DataType,
    left: &TypedValue,
    right: &TypedValue,
) -> Result<bool, EvaluationError> {
    let mismatch = || EvaluationError::OperatorMismatch {
        operator,
        data_type,
    };

    match operator {
        Operator::Equal => Ok(left == right),
        Operator::NotEqual => Ok(left != right),
        Operator::LessThan
        | Operator::LessThanOrEqual
        | Operator::GreaterThan
        | Operator::GreaterThanOrEqual => {
            let ordering = match (left, right) {
                (TypedValue::Number(l), TypedValue::Number(r)) => l.partial_cmp(r),
                (TypedValue::BigInt(l), TypedValue::BigInt(r)) => Some(l.cmp(r)),
                _ => return Err(mismatch()),
            };
            let Some(ordering) = ordering else {
                return Ok(false);
            };
            Ok(match operator {
                Operator::LessThan => ordering == Ordering::Less,
                Operator::LessThanOrEqual => ordering != Ordering::Greater,
                Operator::GreaterThan => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
        Operator::Contains => match (left, right) {
            (TypedValue::List(items), needle) => Ok(items.contains(needle)),
            (TypedValue::String(haystack), TypedValue::String(needle)) => {
                Ok(haystack.contains(needle.as_str()))
            }
            _ => Err(mismatch()),
        },
        Operator::In | Operator::NotIn => {
            let TypedValue::List(items) = right else {
                return Err(EvaluationError::NotACollection {
                    operator,
                    found: right.to_string(),
                });
            };
            let found = items.contains(left);
            Ok(if operator == Operator::In { found } else { !found })
        }
    }
}
