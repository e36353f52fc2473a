//! Pre/Post mapper pin execution.

use crate::circuit::MapperPin;
use crate::error::ParseError;
use crate::json;
use crate::path;
use serde_json::Value;
use tracing::debug;

/// The merged document produced by a mapper pin, with its display form.
#[derive(Debug, Clone, PartialEq)]
pub struct MapperOutput {
    pub document: Value,
    pub pretty: String,
}

/// Runs `pin.fields` over `input` and merges the mapped fragment back into a copy of it.
pub fn execute(pin: &MapperPin, input: &Value) -> MapperOutput {
    let mapped = path::map(&pin.fields, input);
    let document = deep_merge(input, &mapped);
    let pretty = json::to_pretty_string(&document);
    MapperOutput { document, pretty }
}

/// Parses `sample_data` and executes the pin over it.
pub fn execute_sample(pin: &MapperPin, sample_data: &str) -> Result<MapperOutput, ParseError> {
    let input = json::parse_sample_data(sample_data)?;
    Ok(execute(pin, &input))
}

/// Executes the pin over its own stored sample data. A parse failure is returned as
/// its message in place of the document.
pub fn preview(pin: &MapperPin) -> String {
    match execute_sample(pin, &pin.sample_data) {
        Ok(output) => output.pretty,
        Err(e) => {
            debug!("mapper sample data rejected: {}", e);
            e.to_string()
        }
    }
}

/// Merges `overlay` into a copy of `base`.
///
/// Objects present on both sides merge key by key. An empty overlay object leaves any
/// base unchanged, so a mapper that maps nothing returns its input as-is. Any other
/// overlay value (arrays included) replaces the base value whole; a non-empty object
/// overlay therefore replaces an array or scalar base.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                let entry = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        (_, Value::Object(overlay_map)) if overlay_map.is_empty() => base.clone(),
        _ => overlay.clone(),
    }
}
