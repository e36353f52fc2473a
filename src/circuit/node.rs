use super::pin::{FilterPin, MapperPin, Pin, PinKind, PinType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pipeline stage. Nodes are ordered by `order` within their circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: u64,
    #[serde(alias = "circuit_id")]
    pub circuit_id: u64,
    pub order: u32,
    #[serde(alias = "node_type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default = "default_enabled", alias = "is_enabled")]
    pub is_enabled: bool,
    #[serde(default, alias = "is_error")]
    pub is_error: bool,
}

fn default_enabled() -> bool {
    true
}

impl Node {
    pub fn new(id: u64, order: u32, node_type: NodeType) -> Self {
        Self {
            id,
            circuit_id: 0,
            order,
            node_type,
            pins: Vec::new(),
            is_enabled: true,
            is_error: false,
        }
    }

    pub fn with_pin(mut self, pin_type: PinType) -> Self {
        let order = self.pins.len() as u32;
        self.pins.push(Pin { order, pin_type });
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.node_type.kind()
    }

    pub fn pin(&self, kind: PinKind) -> Option<&Pin> {
        self.pins.iter().find(|p| p.pin_type.kind() == kind)
    }

    pub fn pin_mut(&mut self, kind: PinKind) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|p| p.pin_type.kind() == kind)
    }

    /// The `FilterPin` or `LookupFilterPin` of this node, depending on `kind`.
    pub fn filter_pin(&self, kind: PinKind) -> Option<&FilterPin> {
        match self.pin(kind).map(|p| &p.pin_type) {
            Some(PinType::FilterPin(f)) | Some(PinType::LookupFilterPin(f)) => Some(f),
            _ => None,
        }
    }

    /// The `PreMapperPin` or `PostMapperPin` of this node, depending on `kind`.
    pub fn mapper_pin(&self, kind: PinKind) -> Option<&MapperPin> {
        match self.pin(kind).map(|p| &p.pin_type) {
            Some(PinType::PreMapperPin(m)) | Some(PinType::PostMapperPin(m)) => Some(m),
            _ => None,
        }
    }

    /// Serialized sample payload produced by this node, if it has one.
    pub fn sample_payload(&self) -> Option<&str> {
        match &self.node_type {
            NodeType::Canister(n) => n.sample_data.as_deref(),
            NodeType::LookupCanister(n) => n.sample_data.as_deref(),
            NodeType::LookupHttpRequest(n) => n.sample_data.as_deref(),
            NodeType::Output(_) | NodeType::Transformer(_) => None,
        }
    }

    /// Stores a payload on input and lookup nodes. Returns `false` for kinds without one.
    pub fn set_sample_payload(&mut self, payload: String) -> bool {
        match &mut self.node_type {
            NodeType::Canister(n) => n.sample_data = Some(payload),
            NodeType::LookupCanister(n) => n.sample_data = Some(payload),
            NodeType::LookupHttpRequest(n) => n.sample_data = Some(payload),
            NodeType::Output(_) | NodeType::Transformer(_) => return false,
        }
        true
    }
}

/// The closed set of node variants and their configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeType {
    Canister(CanisterInput),
    LookupCanister(LookupCanister),
    LookupHttpRequest(LookupHttpRequest),
    Output(OutputNode),
    Transformer(TransformerNode),
}

impl NodeType {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeType::Canister(_) => NodeKind::Canister,
            NodeType::LookupCanister(_) => NodeKind::LookupCanister,
            NodeType::LookupHttpRequest(_) => NodeKind::LookupHttpRequest,
            NodeType::Output(_) => NodeKind::Output,
            NodeType::Transformer(_) => NodeKind::Transformer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanisterInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "sampleData")]
    pub sample_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupCanister {
    pub name: String,
    pub canister: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub cycles: u64,
    #[serde(default, alias = "sampleData")]
    pub sample_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LookupHttpRequest {
    pub name: String,
    pub url: String,
    #[serde(default = "default_http_method")]
    pub method: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default, alias = "requestBody")]
    pub request_body: Option<String>,
    #[serde(default, alias = "sampleData")]
    pub sample_data: Option<String>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputNode {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformerNode {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Discriminant of [`NodeType`], used to skip whole node kinds during propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Canister,
    LookupCanister,
    LookupHttpRequest,
    Output,
    Transformer,
}

impl NodeKind {
    /// Key under which a lookup node nests its payload inside its `Node:{index}` slot.
    pub fn source_tag(self) -> Option<&'static str> {
        match self {
            NodeKind::LookupCanister => Some("Canister"),
            NodeKind::LookupHttpRequest => Some("HttpRequest"),
            NodeKind::Canister | NodeKind::Output | NodeKind::Transformer => None,
        }
    }

    pub fn is_lookup(self) -> bool {
        self.source_tag().is_some()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
