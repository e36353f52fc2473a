//! Dotted/bracketed paths into JSON documents.
//!
//! A path is a sequence of `.`-separated keys with optional `[n]` indices, e.g.
//! `Node:0.Canister.items[2].id`. The marker `[*]` (or its bare form `[]`) stands for
//! every element of the array at that position; at most one may appear in a path.

pub mod mapper;

pub use mapper::map;

use crate::error::PathError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Largest array index a path may write to.
pub const MAX_WRITE_INDEX: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
    Each,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, ".{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::Each => write!(f, "[*]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let trimmed = path.trim();
        let mut segments = Vec::new();
        let mut key = String::new();
        let mut chars = trimmed.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                }
                '[' => {
                    if !key.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut key)));
                    }
                    let mut inner = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        inner.push(c);
                    }
                    if !closed {
                        return Err(PathError::Unclosed(trimmed.to_string()));
                    }
                    segments.push(Self::parse_bracket(inner.trim()));
                }
                _ => key.push(c),
            }
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if segments.iter().filter(|s| **s == Segment::Each).count() > 1 {
            return Err(PathError::NestedWildcard(trimmed.to_string()));
        }
        Ok(Self { segments })
    }

    fn parse_bracket(inner: &str) -> Segment {
        match inner {
            "" | "*" => Segment::Each,
            _ => match inner.parse::<usize>() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Key(inner.trim_matches(|c| c == '"' || c == '\'').to_string()),
            },
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.contains(&Segment::Each)
    }

    pub fn starts_with_key(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::Key(_)))
    }

    /// Splits the path around its wildcard into `(prefix, suffix)`.
    pub fn split_wildcard(&self) -> Option<(JsonPath, JsonPath)> {
        let at = self.segments.iter().position(|s| *s == Segment::Each)?;
        Some((
            JsonPath {
                segments: self.segments[..at].to_vec(),
            },
            JsonPath {
                segments: self.segments[at + 1..].to_vec(),
            },
        ))
    }

    /// `self[index].suffix` as a concrete path.
    pub fn join_index(&self, index: usize, suffix: &JsonPath) -> JsonPath {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        segments.extend(suffix.segments.iter().cloned());
        JsonPath { segments }
    }

    /// Borrows the value at this path. Wildcard paths never match; use [`JsonPath::resolve`].
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (Segment::Key(key), Value::Object(map)) => map.get(key)?,
                (Segment::Key(key), Value::Array(items)) => items.get(key.parse::<usize>().ok()?)?,
                (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolves the path to an owned value, expanding a wildcard into an array of the
    /// suffix values (absent entries become `null`). `None` when nothing matched.
    pub fn resolve(&self, root: &Value) -> Option<Value> {
        let Some((prefix, suffix)) = self.split_wildcard() else {
            return self.get(root).cloned();
        };
        let items = prefix.get(root)?.as_array()?;
        let values: Vec<Option<&Value>> = items.iter().map(|item| suffix.get(item)).collect();
        if values.iter().all(Option::is_none) {
            return None;
        }
        Some(Value::Array(
            values
                .into_iter()
                .map(|v| v.cloned().unwrap_or(Value::Null))
                .collect(),
        ))
    }

    /// Writes `value` at this path, creating intermediate objects and arrays.
    /// Existing scalars in the way are replaced. Wildcard segments are ignored.
    ///
    /// Writing an index pads the array with `null` up to it. Indices above
    /// [`MAX_WRITE_INDEX`] are rejected before anything is written.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        if let Some(index) = self.segments.iter().find_map(|s| match s {
            Segment::Index(i) if *i > MAX_WRITE_INDEX => Some(*i),
            _ => None,
        }) {
            return Err(PathError::IndexTooLarge {
                path: self.to_string(),
                index,
            });
        }

        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => {
                    if !current.is_object() {
                        *current = Value::Object(Map::new());
                    }
                    match current {
                        Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                        _ => unreachable!("value was just replaced by an object"),
                    }
                }
                Segment::Index(index) => {
                    if !current.is_array() {
                        *current = Value::Array(Vec::new());
                    }
                    match current {
                        Value::Array(items) => {
                            if items.len() <= *index {
                                items.resize(*index + 1, Value::Null);
                            }
                            &mut items[*index]
                        }
                        _ => unreachable!("value was just replaced by an array"),
                    }
                }
                Segment::Each => continue,
            };
        }
        *current = value;
        Ok(())
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{}", k)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}
