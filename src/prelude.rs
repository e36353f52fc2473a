//! Prelude module for convenient imports
//!
//! Re-exports the circuit model, the preview entry points and the error types.
//!
//! # Example
//!
//! ```rust,no_run
//! use circuit_preview::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let circuit = Circuit::from_file("path/to/circuit.json")?;
//! let document = collect_sample_data(circuit.nodes(), &CollectOptions::default());
//! println!("{}", document.to_pretty_string());
//! # Ok(())
//! # }
//! ```

// Circuit model
pub use crate::circuit::{
    Circuit, Condition, ConditionGroup, DataType, FilterPin, MapperPin, Node, NodeKind,
    NodeType, OperandType, Operator, Pin, PinKind, PinType, Rule,
};

// Propagation and configuration
pub use crate::config::PreviewConfig;
pub use crate::data::{
    CollectOptions, SampleDataDocument, collect_sample_data, context_for_pin,
    refresh_lookups, refresh_pin_sample_data,
};

// Evaluation
pub use crate::backend::{ApiError, LookupBackend, LookupRequest, LookupResponse};
pub use crate::evaluator::{self, TypedValue};
pub use crate::mapper::{self, MapperOutput};
pub use crate::template;

// Error types
pub use crate::error::{
    CircuitError, CoercionError, ConfigError, EvaluationError, ParseError, PathError,
    RenderError,
};

// Trace formatting
pub use crate::trace::{FilterReport, RuleTrace, TraceFormatter};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
