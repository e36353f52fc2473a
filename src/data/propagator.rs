use super::model::SampleDataDocument;
use crate::backend::{LookupBackend, LookupRequest, LookupResponse};
use crate::circuit::{Circuit, Node, NodeKind, PinKind};
use crate::error::CircuitError;
use crate::json;
use crate::mapper;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Controls which nodes contribute to a collected document and in which form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectOptions {
    /// Node kinds whose slot is left out entirely.
    #[serde(default)]
    pub skip_node_kinds: Vec<NodeKind>,
    /// Store a node's post-mapper output in its slot instead of the raw payload.
    #[serde(default)]
    pub include_post_mapper_output: bool,
}

/// Gathers the sample data of every node into one namespaced document.
pub fn collect_sample_data(nodes: &[Node], options: &CollectOptions) -> SampleDataDocument {
    collect_ordered(ordered(nodes), options)
}

/// The document a pin of the node at `index` is previewed against.
///
/// `Filter` and `PreMapper` pins run before their node and see strictly upstream
/// nodes. `LookupFilter` and `PostMapper` pins run after it and also see the node's own
/// slot.
pub fn context_for_pin(
    nodes: &[Node],
    index: usize,
    pin_kind: PinKind,
    options: &CollectOptions,
) -> Result<SampleDataDocument, CircuitError> {
    if index >= nodes.len() {
        return Err(CircuitError::NodeOutOfRange {
            index,
            len: nodes.len(),
        });
    }
    let end = if pin_kind.sees_current_node() {
        index + 1
    } else {
        index
    };
    Ok(collect_ordered(ordered(nodes).take(end), options))
}

/// Recomputes and stores the sample data of one pin, returning the stored text.
///
/// A `PostMapper` pin receives its own node's slot, which is what the mapper
/// post-processes. Every other pin receives its full namespaced context.
pub fn refresh_pin_sample_data(
    circuit: &mut Circuit,
    index: usize,
    pin_kind: PinKind,
    options: &CollectOptions,
) -> Result<String, CircuitError> {
    let sample_data = match pin_kind {
        PinKind::PostMapper => {
            let node = circuit.nodes().get(index).ok_or(CircuitError::NodeOutOfRange {
                index,
                len: circuit.nodes().len(),
            })?;
            let slot = raw_slot(node).unwrap_or_else(|| Value::Object(Map::new()));
            json::to_pretty_string(&slot)
        }
        PinKind::Filter | PinKind::LookupFilter | PinKind::PreMapper => {
            context_for_pin(circuit.nodes(), index, pin_kind, options)?.to_pretty_string()
        }
    };

    let node = circuit.node_mut(index)?;
    let node_id = node.id;
    let pin = node
        .pin_mut(pin_kind)
        .ok_or(CircuitError::PinNotFound { node_id, pin_kind })?;
    pin.pin_type.set_sample_data(sample_data.clone());
    debug!("refreshed {} pin sample data on node {}", pin_kind, node_id);
    Ok(sample_data)
}

/// Stores a lookup response as the node's payload. Failures are stored as an
/// `{"error": {...}}` document. Returns `false` when the node cannot hold a payload.
pub fn apply_lookup_response(node: &mut Node, response: LookupResponse) -> bool {
    if let LookupResponse::Err(error) = &response {
        warn!("lookup on node {} failed: {}", node.id, error.message);
    }
    node.set_sample_payload(response.into_payload())
}

/// Runs every enabled lookup node against `backend`, in circuit order.
///
/// Each request is rendered against the data collected upstream of its node, so a
/// lookup sees the refreshed payloads of earlier lookups. Returns the number of nodes
/// refreshed.
pub fn refresh_lookups(
    circuit: &mut Circuit,
    backend: &dyn LookupBackend,
    options: &CollectOptions,
) -> Result<usize, CircuitError> {
    let mut refreshed = 0;
    for index in 0..circuit.nodes().len() {
        let node = &circuit.nodes()[index];
        if !node.is_enabled || !node.kind().is_lookup() {
            continue;
        }
        let upstream = context_for_pin(circuit.nodes(), index, PinKind::Filter, options)?;
        let Some(request) = LookupRequest::for_node(node, &upstream) else {
            continue;
        };

        info!("previewing {} lookup on node {}", node.kind(), node.id);
        let response = backend.preview(&request);
        if apply_lookup_response(circuit.node_mut(index)?, response) {
            refreshed += 1;
        }
    }
    Ok(refreshed)
}

fn ordered(nodes: &[Node]) -> impl Iterator<Item = (usize, &Node)> {
    nodes.iter().sorted_by_key(|n| n.order).enumerate()
}

fn collect_ordered<'a>(
    nodes: impl Iterator<Item = (usize, &'a Node)>,
    options: &CollectOptions,
) -> SampleDataDocument {
    let skipped: AHashSet<NodeKind> = options.skip_node_kinds.iter().copied().collect();
    let mut document = SampleDataDocument::default();

    for (index, node) in nodes {
        if skipped.contains(&node.kind()) {
            debug!("skipping {} node at index {}", node.kind(), index);
            continue;
        }
        if let Some(slot) = node_slot(node, options) {
            document.insert_node(index, slot);
        }
    }
    document
}

fn node_slot(node: &Node, options: &CollectOptions) -> Option<Value> {
    let slot = raw_slot(node);
    if !options.include_post_mapper_output {
        return slot;
    }
    let Some(pin) = node.mapper_pin(PinKind::PostMapper) else {
        return slot;
    };

    let input = match slot {
        Some(slot) => slot,
        None if pin.sample_data.trim().is_empty() => return None,
        None => match json::parse_sample_data(&pin.sample_data) {
            Ok(input) => input,
            Err(e) => return Some(Value::String(e.to_string())),
        },
    };
    Some(mapper::execute(pin, &input).document)
}

/// The node's payload as stored in its slot, nested under the source tag for lookups.
fn raw_slot(node: &Node) -> Option<Value> {
    let payload = payload_value(node.sample_payload()?);
    match node.kind().source_tag() {
        Some(tag) => {
            let mut tagged = Map::new();
            tagged.insert(tag.to_string(), payload);
            Some(Value::Object(tagged))
        }
        None => Some(payload),
    }
}

// Payloads that are not JSON (plain-text HTTP bodies) are kept as strings.
fn payload_value(raw: &str) -> Value {
    json::parse_sample_data(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
