//! `{{path}}` template rendering against a sample-data context.
//!
//! Templates are rendered with Handlebars. Sample-data keys such as `Node:0` are not
//! valid Handlebars identifiers, so path segments containing `:` are rewritten to the
//! literal-segment form (`[Node:0]`) before rendering. `items[0]` is accepted as a
//! shorthand for `items.[0]`.

mod helpers;

use crate::error::RenderError;
use handlebars::{Handlebars, Template};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

static RESOLVER: LazyLock<TemplateResolver> = LazyLock::new(TemplateResolver::default);

/// Renders `template` with the shared resolver.
pub fn resolve(template: &str, context: &Value) -> Result<String, RenderError> {
    RESOLVER.resolve(template, context)
}

/// Renders `template`, substituting the error message when rendering fails.
pub fn render_or_message(template: &str, context: &Value) -> String {
    RESOLVER.render_or_message(template, context)
}

/// A string is a template only when it contains both `{{` and `}}`.
pub fn has_placeholders(text: &str) -> bool {
    text.contains("{{") && text.contains("}}")
}

/// A Handlebars registry preloaded with the preview helpers.
pub struct TemplateResolver {
    registry: Handlebars<'static>,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);
        Self { registry }
    }
}

impl TemplateResolver {
    pub fn resolve(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        if !has_placeholders(template) {
            return Ok(template.to_string());
        }
        let normalized = normalize_paths(template);
        Template::compile(&normalized).map_err(|e| RenderError::Template(e.to_string()))?;
        self.registry
            .render_template(&normalized, context)
            .map_err(|e| RenderError::Render(e.to_string()))
    }

    pub fn render_or_message(&self, template: &str, context: &Value) -> String {
        self.resolve(template, context).unwrap_or_else(|e| {
            debug!(template, "template rendered as error text: {}", e);
            e.to_string()
        })
    }
}

/// Rewrites the path tokens of every `{{ }}` expression into Handlebars syntax.
fn normalize_paths(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start + 2]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(after);
            return out;
        };
        out.push_str(&normalize_expression(&after[..end]));
        out.push_str("}}");
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn normalize_expression(expr: &str) -> String {
    if expr.trim_start().starts_with('!') {
        return expr.to_string();
    }

    let mut out = String::with_capacity(expr.len());
    let mut token = String::new();
    let mut chars = expr.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                flush_token(&mut out, &mut token);
                out.push(c);
                for q in chars.by_ref() {
                    out.push(q);
                    if q == c {
                        break;
                    }
                }
            }
            '[' => {
                if !token.is_empty() && !token.ends_with('.') && !token.ends_with('/') {
                    token.push('.');
                }
                token.push(c);
                for q in chars.by_ref() {
                    token.push(q);
                    if q == ']' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() || "(){}=#^~&>".contains(c) => {
                flush_token(&mut out, &mut token);
                out.push(c);
            }
            _ => token.push(c),
        }
    }
    flush_token(&mut out, &mut token);
    out
}

/// Splits leading scope steps (`../`, `./`, `this/`) off a path token.
fn split_scope(token: &str) -> (&str, &str) {
    let mut path = token;
    while let Some(rest) = ["../", "./", "this/"]
        .iter()
        .find_map(|prefix| path.strip_prefix(*prefix))
    {
        path = rest;
    }
    token.split_at(token.len() - path.len())
}

fn flush_token(out: &mut String, token: &mut String) {
    if token.contains(':') {
        let (scope, path) = split_scope(token);
        out.push_str(scope);
        let rewritten = path
            .split('.')
            .map(|part| {
                if part.contains(':') && !part.starts_with('[') {
                    format!("[{}]", part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(".");
        out.push_str(&rewritten);
    } else {
        out.push_str(token);
    }
    token.clear();
}
