use crate::circuit::{DataType, Operator, PinKind};
use thiserror::Error;

/// Sample data attached to a pin or node is not valid JSON.
#[derive(Error, Debug, Clone)]
#[error("Failed to parse sample data: {0}")]
pub struct ParseError(pub String);

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError(err.to_string())
    }
}

/// A mapping or lookup path could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path '{0}' has an unclosed '['")]
    Unclosed(String),

    #[error("Path '{0}' uses more than one [*] wildcard")]
    NestedWildcard(String),

    #[error("Output path '{0}' must start with a key")]
    NotAnObjectKey(String),

    #[error(
        "Output path '{path}' writes index {index}, above the limit of {max}",
        max = crate::path::MAX_WRITE_INDEX
    )]
    IndexTooLarge { path: String, index: usize },
}

/// Errors raised while rendering a `{{ }}` template.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Template could not be parsed: {0}")]
    Template(String),

    #[error("Template could not be rendered: {0}")]
    Render(String),
}

/// A textual operand could not be cast to the data type a rule asks for.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot convert '{value}' to {data_type}: {reason}")]
pub struct CoercionError {
    pub value: String,
    pub data_type: DataType,
    pub reason: String,
}

/// Errors that can occur while evaluating a filter rule set.
#[derive(Error, Debug, Clone)]
pub enum EvaluationError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Field '{0}' not found in the sample data")]
    FieldNotFound(String),

    #[error("Operator '{operator}' cannot be applied to {data_type} values")]
    OperatorMismatch {
        operator: Operator,
        data_type: DataType,
    },

    #[error("Operator '{operator}' expects a list of values, but found '{found}'")]
    NotACollection { operator: Operator, found: String },

    #[error("A condition group (And/Or) is required when a filter has {0} rules")]
    MissingConditionGroup(usize),

    #[error("The filter has no rules to evaluate")]
    EmptyRuleSet,
}

/// Violations of the circuit data-model invariants.
#[derive(Error, Debug, Clone)]
pub enum CircuitError {
    #[error("Failed to parse circuit JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{node_id}' has more than one {pin_kind} pin")]
    DuplicatePin { node_id: u64, pin_kind: PinKind },

    #[error("Filter on node '{node_id}' has {rules} rules but no condition group")]
    MissingConditionGroup { node_id: u64, rules: usize },

    #[error("Nodes '{first}' and '{second}' share the order {order}")]
    DuplicateOrder { first: u64, second: u64, order: u32 },

    #[error("Node index {index} is out of range for a circuit of {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("Node '{node_id}' has no {pin_kind} pin")]
    PinNotFound { node_id: u64, pin_kind: PinKind },
}

/// Errors that can occur while loading preview configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
