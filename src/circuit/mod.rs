pub mod node;
pub mod pin;

pub use node::*;
pub use pin::*;

use crate::error::CircuitError;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;

/// An ordered pipeline of nodes.
///
/// Construction sorts the nodes by their `order`, so the position of a node in
/// [`Circuit::nodes`] is the index used for its `Node:{index}` sample-data key.
/// Deserialization goes through the same constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CircuitRecord")]
pub struct Circuit {
    pub id: u64,
    pub name: String,
    nodes: Vec<Node>,
}

/// Wire shape of a persisted circuit, in whatever node order it was stored.
#[derive(Deserialize)]
struct CircuitRecord {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    name: String,
    nodes: Vec<Node>,
}

impl From<CircuitRecord> for Circuit {
    fn from(record: CircuitRecord) -> Self {
        Self::new(record.id, record.name, record.nodes)
    }
}

impl Circuit {
    pub fn new(id: u64, name: impl Into<String>, nodes: Vec<Node>) -> Self {
        let nodes = nodes.into_iter().sorted_by_key(|n| n.order).collect();
        Self {
            id,
            name: name.into(),
            nodes,
        }
    }

    /// Parses a persisted circuit and orders its nodes.
    pub fn from_json(json: &str) -> Result<Self, CircuitError> {
        serde_json::from_str(json).map_err(|e| CircuitError::JsonParseError(e.to_string()))
    }

    /// Load a circuit from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_mut(&mut self, index: usize) -> Result<&mut Node, CircuitError> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(index)
            .ok_or(CircuitError::NodeOutOfRange { index, len })
    }

    /// Position of the node with `id`, which is also its sample-data index.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Checks the data-model invariants: unique orders, at most one pin of each
    /// kind per node, and a condition group on every multi-rule filter.
    pub fn validate(&self) -> Result<(), CircuitError> {
        for (a, b) in self.nodes.iter().tuple_windows() {
            if a.order == b.order {
                return Err(CircuitError::DuplicateOrder {
                    first: a.id,
                    second: b.id,
                    order: a.order,
                });
            }
        }

        for node in &self.nodes {
            let mut seen = AHashSet::new();
            for pin in &node.pins {
                let kind = pin.pin_type.kind();
                if !seen.insert(kind) {
                    return Err(CircuitError::DuplicatePin {
                        node_id: node.id,
                        pin_kind: kind,
                    });
                }
                if let PinType::FilterPin(f) | PinType::LookupFilterPin(f) = &pin.pin_type {
                    if f.rules.len() > 1 && f.condition_group.is_none() {
                        return Err(CircuitError::MissingConditionGroup {
                            node_id: node.id,
                            rules: f.rules.len(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
