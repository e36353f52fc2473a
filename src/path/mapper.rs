use super::JsonPath;
use crate::circuit::FieldMapping;
use crate::error::PathError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Copies values from `source` into a fresh object according to `fields`.
///
/// Pairs are applied in order and later pairs win at the leaf. Input paths that are
/// missing from `source` produce nothing, so partial sample data still maps.
pub fn map(fields: &[FieldMapping], source: &Value) -> Value {
    let mut result = Value::Object(Map::new());

    for (input, output) in fields {
        if let Err(e) = apply_pair(input, output, source, &mut result) {
            warn!(input = %input, output = %output, "skipping field mapping: {}", e);
        }
    }
    result
}

fn apply_pair(
    input: &str,
    output: &str,
    source: &Value,
    result: &mut Value,
) -> Result<(), PathError> {
    let input_path = JsonPath::parse(input)?;
    let output_path = JsonPath::parse(output)?;
    if !output_path.starts_with_key() {
        return Err(PathError::NotAnObjectKey(output.to_string()));
    }

    match (input_path.split_wildcard(), output_path.split_wildcard()) {
        (None, None) => {
            if let Some(value) = input_path.get(source) {
                output_path.set(result, value.clone())?;
            } else {
                debug!(input, "input path missing from source");
            }
        }
        (Some((in_prefix, in_suffix)), out_split) => {
            let Some(items) = in_prefix.get(source).and_then(Value::as_array) else {
                debug!(input, "wildcard prefix is not an array");
                return Ok(());
            };
            let values: Vec<Option<&Value>> =
                items.iter().map(|item| in_suffix.get(item)).collect();
            if values.iter().all(Option::is_none) {
                return Ok(());
            }
            match out_split {
                Some((out_prefix, out_suffix)) => {
                    for (index, value) in values.into_iter().enumerate() {
                        if let Some(value) = value {
                            out_prefix
                                .join_index(index, &out_suffix)
                                .set(result, value.clone())?;
                        }
                    }
                }
                None => {
                    let collected = values
                        .into_iter()
                        .map(|v| v.cloned().unwrap_or(Value::Null))
                        .collect();
                    output_path.set(result, Value::Array(collected))?;
                }
            }
        }
        (None, Some((out_prefix, out_suffix))) => match input_path.get(source) {
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    out_prefix
                        .join_index(index, &out_suffix)
                        .set(result, item.clone())?;
                }
            }
            Some(value) => out_prefix
                .join_index(0, &out_suffix)
                .set(result, value.clone())?,
            None => debug!(input, "input path missing from source"),
        },
    }
    Ok(())
}
