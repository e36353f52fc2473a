use super::value::{TypedValue, coerce_json, coerce_text};
use crate::circuit::{OperandType, Operator, Rule};
use crate::error::EvaluationError;
use crate::path::JsonPath;
use crate::template;
use serde_json::Value;

/// Resolves the left-hand side of a rule: `rule.field` names a path into `context`
/// (rendered first when it is a template). Returns the resolved path text and value.
pub fn resolve_field(
    rule: &Rule,
    context: &Value,
) -> Result<(String, TypedValue), EvaluationError> {
    let (path, raw) = lookup(&rule.field, context)?;
    let value = match (&raw, rule.operator) {
        (Value::Array(items), Operator::Contains) => TypedValue::List(
            items
                .iter()
                .map(|item| coerce_json(item, rule.data_type))
                .collect::<Result<_, _>>()?,
        ),
        _ => coerce_json(&raw, rule.data_type)?,
    };
    Ok((path, value))
}

/// Resolves the right-hand side of a rule according to its operand type.
///
/// `In`/`NotIn` always resolve to a [`TypedValue::List`]: a literal is read as a JSON
/// array when possible and as comma-separated text otherwise, a field must hold an array.
pub fn resolve_operand(rule: &Rule, context: &Value) -> Result<TypedValue, EvaluationError> {
    match rule.operand_type {
        OperandType::Value => {
            let text = template::resolve(&rule.value, context)?;
            if rule.operator.expects_collection() {
                return literal_list(&text, rule);
            }
            Ok(coerce_text(&text, rule.data_type)?)
        }
        OperandType::Field => {
            let (_, raw) = lookup(&rule.value, context)?;
            if rule.operator.expects_collection() {
                let Value::Array(items) = &raw else {
                    return Err(EvaluationError::NotACollection {
                        operator: rule.operator,
                        found: raw.to_string(),
                    });
                };
                return Ok(TypedValue::List(
                    items
                        .iter()
                        .map(|item| coerce_json(item, rule.data_type))
                        .collect::<Result<_, _>>()?,
                ));
            }
            Ok(coerce_json(&raw, rule.data_type)?)
        }
    }
}

fn lookup(path_template: &str, context: &Value) -> Result<(String, Value), EvaluationError> {
    let rendered = template::resolve(path_template, context)?;
    let path_text = rendered.trim().to_string();
    let path = JsonPath::parse(&path_text)?;
    let raw = path
        .resolve(context)
        .ok_or_else(|| EvaluationError::FieldNotFound(path_text.clone()))?;
    Ok((path_text, raw))
}

fn literal_list(text: &str, rule: &Rule) -> Result<TypedValue, EvaluationError> {
    let items = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_json(item, rule.data_type))
            .collect::<Result<_, _>>()?,
        _ => text
            .split(',')
            .map(|item| coerce_text(item.trim(), rule.data_type))
            .collect::<Result<_, _>>()?,
    };
    Ok(TypedValue::List(items))
}
