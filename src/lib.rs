//! # Circuit Preview - Sample-Data Preview Engine for Node Pipelines
//!
//! **circuit-preview** computes what a circuit of nodes would do with sample data, without
//! running it. A circuit is an ordered pipeline of input, lookup, transformer and output
//! nodes; each node may carry pins that filter or reshape the data flowing through it.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Circuit**: Parse a persisted circuit with `Circuit::from_json`. Nodes are
//!     ordered by their `order`, and a node's position is its sample-data index.
//! 2.  **Collect Sample Data**: `data::collect_sample_data` gathers every node's payload
//!     into one namespaced document (`Node:0`, `Node:1`, ...). `data::context_for_pin`
//!     restricts it to what a given pin can see.
//! 3.  **Preview Pins**: Filter pins are evaluated with `evaluator::evaluate_with_trace`
//!     (or rendered to text with `evaluator::preview`); mapper pins are executed with
//!     `mapper::execute`.
//! 4.  **Refresh Lookups** (optional): Implement `LookupBackend` and call
//!     `data::refresh_lookups` to replace lookup payloads with live previews.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use circuit_preview::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let circuit = Circuit::from_file("path/to/circuit.json")?;
//!     circuit.validate()?;
//!
//!     let options = CollectOptions::default();
//!     for (index, node) in circuit.nodes().iter().enumerate() {
//!         let Some(pin) = node.filter_pin(PinKind::Filter) else {
//!             continue;
//!         };
//!         let context = context_for_pin(circuit.nodes(), index, PinKind::Filter, &options)?;
//!         let report = evaluator::evaluate_with_trace(pin, &context.to_value())?;
//!
//!         println!("Node {}: {}", node.id, report.reason());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod circuit;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod json;
pub mod mapper;
pub mod path;
pub mod prelude;
pub mod template;
pub mod trace;
