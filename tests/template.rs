//! Template rendering against sample-data documents.
use circuit_preview::error::RenderError;
use circuit_preview::template::{self, TemplateResolver};
use serde_json::json;

#[test]
fn test_text_without_markers_is_unchanged() {
    let context = json!({"Node:0": {"x": "v"}});
    assert_eq!(template::resolve("plain text", &context).unwrap(), "plain text");
    assert_eq!(template::resolve("only {{ open", &context).unwrap(), "only {{ open");
}

#[test]
fn test_node_keys_resolve() {
    let context = json!({"Node:0": {"x": "v"}});
    assert_eq!(template::resolve("{{Node:0.x}}", &context).unwrap(), "v");
}

#[test]
fn test_nested_lookup_paths() {
    let context = json!({
        "Node:1": {"Canister": {"address": {"city": "Zurich"}, "items": [{"id": 7}]}}
    });
    assert_eq!(
        template::resolve("{{Node:1.Canister.address.city}}", &context).unwrap(),
        "Zurich"
    );
    assert_eq!(
        template::resolve("id={{Node:1.Canister.items[0].id}}", &context).unwrap(),
        "id=7"
    );
}

#[test]
fn test_parent_scope_paths_reach_other_nodes() {
    let context = json!({"Node:0": {"x": 1}, "Node:1": {"y": "v"}});
    assert_eq!(
        template::resolve("{{#with Node:0}}{{x}}-{{../Node:1.y}}{{/with}}", &context).unwrap(),
        "1-v"
    );
    assert_eq!(
        template::resolve("{{#each Node:1}}{{../Node:0.x}}{{/each}}", &context).unwrap(),
        "1"
    );
}

#[test]
fn test_missing_paths_render_empty() {
    let context = json!({"Node:0": {}});
    assert_eq!(template::resolve("[{{Node:0.nope}}]", &context).unwrap(), "[]");
}

#[test]
fn test_output_is_not_html_escaped() {
    let context = json!({"q": "a < b & \"c\""});
    assert_eq!(template::resolve("{{q}}", &context).unwrap(), "a < b & \"c\"");
}

#[test]
fn test_string_helpers() {
    let context = json!({"Node:0": {"name": "  Ada ", "tags": ["x", "y"]}});
    assert_eq!(
        template::resolve("{{uppercase (trim Node:0.name)}}", &context).unwrap(),
        "ADA"
    );
    assert_eq!(
        template::resolve("{{concat \"user-\" (lowercase (trim Node:0.name))}}", &context)
            .unwrap(),
        "user-ada"
    );
    assert_eq!(
        template::resolve("{{json Node:0.tags}}", &context).unwrap(),
        "[\"x\",\"y\"]"
    );
}

#[test]
fn test_logic_helpers() {
    let context = json!({"Node:0": {"age": 30, "tags": ["vip"]}});
    assert_eq!(
        template::resolve("{{#if (gt Node:0.age 18)}}adult{{else}}minor{{/if}}", &context)
            .unwrap(),
        "adult"
    );
    assert_eq!(
        template::resolve("{{#if (contains Node:0.tags \"vip\")}}vip{{/if}}", &context)
            .unwrap(),
        "vip"
    );
    assert_eq!(template::resolve("{{len Node:0.tags}}", &context).unwrap(), "1");
}

#[test]
fn test_syntax_errors_are_reported() {
    let result = template::resolve("{{#if x}}unterminated", &json!({}));
    assert!(matches!(result, Err(RenderError::Template(_))));
}

#[test]
fn test_render_or_message_returns_error_text() {
    let text = template::render_or_message("{{#if x}}unterminated", &json!({}));
    assert!(text.starts_with("Template could not be parsed"));
}

#[test]
fn test_resolver_instances_are_independent() {
    let resolver = TemplateResolver::default();
    assert_eq!(
        resolver.resolve("{{a}}-{{b}}", &json!({"a": 1, "b": true})).unwrap(),
        "1-true"
    );
}
