use crate::error::ParseError;
use crate::json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;

/// The namespaced context a preview is evaluated against.
///
/// Keys are `Node:{index}`, where `index` is the zero-based position of the node in its
/// circuit. Lookup nodes nest their payload under a source tag (`Canister`,
/// `HttpRequest`). Nodes without data have no key at all.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SampleDataDocument(Map<String, Value>);

impl SampleDataDocument {
    pub fn key(index: usize) -> String {
        format!("Node:{}", index)
    }

    pub fn insert_node(&mut self, index: usize, value: Value) {
        self.0.insert(Self::key(index), value);
    }

    pub fn node(&self, index: usize) -> Option<&Value> {
        self.0.get(&Self::key(index))
    }

    pub fn contains_node(&self, index: usize) -> bool {
        self.0.contains_key(&Self::key(index))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// The document as 4-space indented JSON, the form stored in a pin's sample data.
    pub fn to_pretty_string(&self) -> String {
        json::to_pretty_string(&self.to_value())
    }

    /// Parses a previously stored document.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        match json::parse_sample_data(text)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ParseError(format!(
                "expected a JSON object of node slots, found '{}'",
                other
            ))),
        }
    }

    /// Load a stored document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}
