use crate::error::ParseError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

/// Indentation used when sample data is written back for display.
pub const DEFAULT_INDENT: usize = 4;

/// Parses serialized sample data. Blank text is an empty document.
pub fn parse_sample_data(text: &str) -> Result<Value, ParseError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(text)?)
}

/// Human-readable JSON with the default 4-space indentation.
pub fn to_pretty_string(value: &Value) -> String {
    to_pretty_string_with_indent(value, DEFAULT_INDENT)
}

pub fn to_pretty_string_with_indent(value: &Value, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}
