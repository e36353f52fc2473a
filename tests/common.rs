//! Common test utilities for building circuits, pins and sample data.
use circuit_preview::circuit::{CanisterInput, LookupCanister, LookupHttpRequest, OutputNode};
use circuit_preview::prelude::*;

/// A circuit with an input node, a canister lookup and an output node.
///
/// The output node filters on `Node:1.Canister.balance > 100`.
#[allow(dead_code)]
pub fn create_three_node_circuit() -> Circuit {
    let filter = filter_pin(
        Condition::Is,
        None,
        vec![rule(
            "Node:1.Canister.balance",
            Operator::GreaterThan,
            "100",
            DataType::Number,
        )],
    );

    Circuit::new(
        1,
        "balances",
        vec![
            input_node(10, 0, r#"{"user": {"name": "Ada", "age": 30}}"#),
            lookup_canister_node(11, 1, Some(r#"{"balance": 250}"#)),
            output_node(12, 2).with_pin(PinType::FilterPin(filter)),
        ],
    )
}

#[allow(dead_code)]
pub fn input_node(id: u64, order: u32, payload: &str) -> Node {
    Node::new(
        id,
        order,
        NodeType::Canister(CanisterInput {
            name: format!("input-{}", id),
            sample_data: Some(payload.to_string()),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn lookup_canister_node(id: u64, order: u32, payload: Option<&str>) -> Node {
    Node::new(
        id,
        order,
        NodeType::LookupCanister(LookupCanister {
            name: format!("lookup-{}", id),
            canister: "ryjl3-tyaaa-aaaaa-aaaba-cai".to_string(),
            method: "account_balance".to_string(),
            args: vec!["{{Node:0.user.name}}".to_string()],
            sample_data: payload.map(str::to_string),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn lookup_http_node(id: u64, order: u32, url: &str) -> Node {
    Node::new(
        id,
        order,
        NodeType::LookupHttpRequest(LookupHttpRequest {
            name: format!("http-{}", id),
            url: url.to_string(),
            method: "GET".to_string(),
            ..Default::default()
        }),
    )
}

#[allow(dead_code)]
pub fn output_node(id: u64, order: u32) -> Node {
    Node::new(
        id,
        order,
        NodeType::Output(OutputNode {
            name: format!("output-{}", id),
            description: None,
        }),
    )
}

/// A rule comparing the value at `field` with a literal.
#[allow(dead_code)]
pub fn rule(field: &str, operator: Operator, value: &str, data_type: DataType) -> Rule {
    Rule {
        field: field.to_string(),
        operator,
        value: value.to_string(),
        data_type,
        operand_type: OperandType::Value,
    }
}

/// A rule comparing the values at two paths.
#[allow(dead_code)]
pub fn field_rule(field: &str, operator: Operator, other: &str, data_type: DataType) -> Rule {
    Rule {
        operand_type: OperandType::Field,
        ..rule(field, operator, other, data_type)
    }
}

#[allow(dead_code)]
pub fn filter_pin(
    condition: Condition,
    condition_group: Option<ConditionGroup>,
    rules: Vec<Rule>,
) -> FilterPin {
    FilterPin {
        condition,
        condition_group,
        rules,
        sample_data: String::new(),
    }
}

#[allow(dead_code)]
pub fn mapper_pin(fields: &[(&str, &str)]) -> MapperPin {
    MapperPin {
        sample_data: String::new(),
        fields: fields
            .iter()
            .map(|(i, o)| (i.to_string(), o.to_string()))
            .collect(),
    }
}

/// A persisted circuit in the camelCase record format.
#[allow(dead_code)]
pub const CIRCUIT_JSON: &str = r#"{
    "id": 7,
    "name": "adult users",
    "nodes": [
        {
            "id": 3,
            "circuitId": 7,
            "order": 2,
            "nodeType": { "Output": { "name": "sink" } },
            "pins": [
                {
                    "order": 0,
                    "pinType": {
                        "FilterPin": {
                            "condition": "Is",
                            "conditionGroup": "And",
                            "rules": [
                                {
                                    "field": "Node:0.user.age",
                                    "operator": "GreaterThanOrEqual",
                                    "value": "18",
                                    "dataType": "Number",
                                    "operandType": "Value"
                                },
                                {
                                    "field": "Node:1.HttpRequest.status",
                                    "operator": "Equal",
                                    "value": "active",
                                    "dataType": "String",
                                    "operandType": "Value"
                                }
                            ],
                            "sampleData": ""
                        }
                    }
                }
            ]
        },
        {
            "id": 1,
            "circuitId": 7,
            "order": 0,
            "nodeType": {
                "Canister": {
                    "name": "users",
                    "sampleData": "{\"user\": {\"id\": 42, \"age\": 30}}"
                }
            },
            "pins": [
                {
                    "order": 0,
                    "pinType": {
                        "PostMapperPin": {
                            "fields": [["user.id", "user.key"]]
                        }
                    }
                }
            ]
        },
        {
            "id": 2,
            "circuitId": 7,
            "order": 1,
            "nodeType": {
                "LookupHttpRequest": {
                    "name": "status",
                    "url": "https://api.example.com/users/{{Node:0.user.id}}",
                    "sampleData": "{\"status\": \"active\"}"
                }
            },
            "isEnabled": true
        }
    ]
}"#;
