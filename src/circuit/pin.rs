use serde::{Deserialize, Serialize};
use std::fmt;

/// An `(input_path, output_path)` pair of a mapper pin.
pub type FieldMapping = (String, String);

/// A configurable filter or mapper attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub order: u32,
    #[serde(alias = "pinType")]
    pub pin_type: PinType,
}

/// The closed set of pin variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PinType {
    FilterPin(FilterPin),
    LookupFilterPin(FilterPin),
    PreMapperPin(MapperPin),
    PostMapperPin(MapperPin),
}

impl PinType {
    pub fn kind(&self) -> PinKind {
        match self {
            PinType::FilterPin(_) => PinKind::Filter,
            PinType::LookupFilterPin(_) => PinKind::LookupFilter,
            PinType::PreMapperPin(_) => PinKind::PreMapper,
            PinType::PostMapperPin(_) => PinKind::PostMapper,
        }
    }

    pub fn sample_data(&self) -> &str {
        match self {
            PinType::FilterPin(p) | PinType::LookupFilterPin(p) => &p.sample_data,
            PinType::PreMapperPin(p) | PinType::PostMapperPin(p) => &p.sample_data,
        }
    }

    pub fn set_sample_data(&mut self, sample_data: String) {
        match self {
            PinType::FilterPin(p) | PinType::LookupFilterPin(p) => p.sample_data = sample_data,
            PinType::PreMapperPin(p) | PinType::PostMapperPin(p) => p.sample_data = sample_data,
        }
    }
}

/// Discriminant of [`PinType`], used where only the kind matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinKind {
    Filter,
    LookupFilter,
    PreMapper,
    PostMapper,
}

impl PinKind {
    /// Whether the pin runs after its node executed, and so can see the node's own output.
    pub fn sees_current_node(self) -> bool {
        match self {
            PinKind::LookupFilter | PinKind::PostMapper => true,
            PinKind::Filter | PinKind::PreMapper => false,
        }
    }
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PinKind::Filter => "FilterPin",
            PinKind::LookupFilter => "LookupFilterPin",
            PinKind::PreMapper => "PreMapperPin",
            PinKind::PostMapper => "PostMapperPin",
        };
        write!(f, "{}", name)
    }
}

/// Rule set of a `FilterPin` or `LookupFilterPin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPin {
    pub condition: Condition,
    #[serde(default, alias = "conditionGroup")]
    pub condition_group: Option<ConditionGroup>,
    pub rules: Vec<Rule>,
    #[serde(default, alias = "sampleData")]
    pub sample_data: String,
}

/// Field remapping of a `PreMapperPin` or `PostMapperPin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperPin {
    #[serde(default, alias = "sampleData")]
    pub sample_data: String,
    pub fields: Vec<FieldMapping>,
}

/// Outer condition applied to the combined rule outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Is,
    Not,
}

/// Combinator applied uniformly across a filter's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionGroup {
    And,
    Or,
}

impl fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionGroup::And => write!(f, "AND"),
            ConditionGroup::Or => write!(f, "OR"),
        }
    }
}

/// A single comparison of a filter pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub field: String,
    pub operator: Operator,
    pub value: String,
    #[serde(alias = "data_type")]
    pub data_type: DataType,
    #[serde(alias = "operand_type")]
    pub operand_type: OperandType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Contains,
    In,
    NotIn,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Contains => "CONTAINS",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
        }
    }

    /// `In`/`NotIn` compare against a list rather than a single value.
    pub fn expects_collection(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Number,
    Boolean,
    Principal,
    BigInt,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::String => "String",
            DataType::Number => "Number",
            DataType::Boolean => "Boolean",
            DataType::Principal => "Principal",
            DataType::BigInt => "BigInt",
        };
        write!(f, "{}", name)
    }
}

/// Whether a rule's `value` is a literal or a path into the sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandType {
    Value,
    Field,
}
