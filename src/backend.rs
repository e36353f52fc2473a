use crate::circuit::{Node, NodeType};
use crate::data::SampleDataDocument;
use crate::template;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A structured failure reported by the remote lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
}

/// Result of a lookup preview call: `{ "Ok": string } | { "Err": ApiError }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupResponse {
    Ok(String),
    Err(ApiError),
}

impl LookupResponse {
    /// The serialized payload stored on the node. Failures become an
    /// `{"error": {...}}` document so downstream previews still have data to show.
    pub fn into_payload(self) -> String {
        match self {
            LookupResponse::Ok(payload) => payload,
            LookupResponse::Err(error) => json!({ "error": error }).to_string(),
        }
    }
}

/// The call a lookup node would make, with its templates rendered against upstream data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LookupRequest {
    Canister {
        node_id: u64,
        canister: String,
        method: String,
        args: Vec<String>,
        cycles: u64,
    },
    HttpRequest {
        node_id: u64,
        url: String,
        method: String,
        headers: Vec<(String, String)>,
        body: Option<String>,
    },
}

impl LookupRequest {
    /// Builds the request for a lookup node; `None` for every other node kind.
    pub fn for_node(node: &Node, upstream: &SampleDataDocument) -> Option<Self> {
        let context = upstream.to_value();
        let render = |text: &str| template::render_or_message(text, &context);

        match &node.node_type {
            NodeType::LookupCanister(lookup) => Some(LookupRequest::Canister {
                node_id: node.id,
                canister: lookup.canister.clone(),
                method: lookup.method.clone(),
                args: lookup.args.iter().map(|a| render(a)).collect(),
                cycles: lookup.cycles,
            }),
            NodeType::LookupHttpRequest(lookup) => Some(LookupRequest::HttpRequest {
                node_id: node.id,
                url: render(&lookup.url),
                method: lookup.method.clone(),
                headers: lookup
                    .headers
                    .iter()
                    .map(|(k, v)| (k.clone(), render(v)))
                    .collect(),
                body: lookup.request_body.as_deref().map(render),
            }),
            NodeType::Canister(_) | NodeType::Output(_) | NodeType::Transformer(_) => None,
        }
    }
}

/// The remote collaborator that executes lookup previews (a canister or HTTP call).
/// Transport, retries and async scheduling live behind this trait.
pub trait LookupBackend {
    fn preview(&self, request: &LookupRequest) -> LookupResponse;
}
