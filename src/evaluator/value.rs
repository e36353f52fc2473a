use crate::circuit::DataType;
use crate::error::CoercionError;
use ic_principal::Principal;
use itertools::Itertools;
use num_bigint::BigInt;
use serde_json::Value;
use std::fmt;

/// A rule operand after coercion to the rule's data type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt(BigInt),
    Principal(Principal),
    List(Vec<TypedValue>),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => write!(f, "\"{}\"", s),
            TypedValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::BigInt(n) => write!(f, "{}", n),
            TypedValue::Principal(p) => write!(f, "{}", p.to_text()),
            TypedValue::List(items) => write!(f, "[{}]", items.iter().join(", ")),
        }
    }
}

/// Casts operand text to `data_type`.
pub fn coerce_text(text: &str, data_type: DataType) -> Result<TypedValue, CoercionError> {
    let fail = |reason: &str| CoercionError {
        value: text.to_string(),
        data_type,
        reason: reason.to_string(),
    };

    match data_type {
        DataType::String => Ok(TypedValue::String(text.to_string())),
        DataType::Number => {
            let trimmed = text.trim();
            if !is_decimal_literal(trimmed) {
                return Err(fail("not a number"));
            }
            let number = trimmed.parse::<f64>().map_err(|_| fail("not a number"))?;
            if number.is_nan() {
                return Err(fail("NaN cannot be compared"));
            }
            Ok(TypedValue::Number(number))
        }
        DataType::Boolean => match text {
            "true" => Ok(TypedValue::Boolean(true)),
            "false" => Ok(TypedValue::Boolean(false)),
            _ => Err(fail("expected 'true' or 'false'")),
        },
        DataType::BigInt => {
            let trimmed = text.trim();
            if trimmed.contains('_') {
                return Err(fail("digit separators are not allowed"));
            }
            trimmed
                .parse::<BigInt>()
                .map(TypedValue::BigInt)
                .map_err(|_| fail("not an integer"))
        }
        DataType::Principal => Principal::from_text(text.trim())
            .map(TypedValue::Principal)
            .map_err(|e| fail(&e.to_string())),
    }
}

/// Decimal or exponent notation, or a signed `Infinity`. Rejects the lowercase
/// `inf`/`infinity`/`nan` spellings that `f64::from_str` would otherwise accept.
fn is_decimal_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned == "Infinity"
        || (unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && unsigned
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')))
}

/// Casts a JSON value found in the sample data to `data_type`.
pub fn coerce_json(value: &Value, data_type: DataType) -> Result<TypedValue, CoercionError> {
    match (value, data_type) {
        (Value::String(s), _) => coerce_text(s, data_type),
        (Value::Number(n), DataType::Number) => n.as_f64().map(TypedValue::Number).ok_or_else(|| {
            CoercionError {
                value: n.to_string(),
                data_type,
                reason: "not representable as a float".to_string(),
            }
        }),
        (Value::Number(n), DataType::BigInt) => {
            if let Some(i) = n.as_i64() {
                Ok(TypedValue::BigInt(BigInt::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(TypedValue::BigInt(BigInt::from(u)))
            } else {
                coerce_text(&n.to_string(), data_type)
            }
        }
        (Value::Bool(b), DataType::Boolean) => Ok(TypedValue::Boolean(*b)),
        (other, _) => coerce_text(&other.to_string(), data_type),
    }
}
