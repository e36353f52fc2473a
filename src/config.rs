use crate::circuit::NodeKind;
use crate::data::CollectOptions;
use crate::error::ConfigError;
use crate::json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Settings for one preview session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Node kinds left out of collected sample data.
    #[serde(default)]
    pub skip_node_kinds: Vec<NodeKind>,
    /// Use post-mapper output as a node's sample data when it has a post mapper.
    #[serde(default = "default_include_post_mapper_output")]
    pub include_post_mapper_output: bool,
    /// Indentation width of pretty-printed previews.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_include_post_mapper_output() -> bool {
    true
}

fn default_indent() -> usize {
    json::DEFAULT_INDENT
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            skip_node_kinds: Vec::new(),
            include_post_mapper_output: default_include_post_mapper_output(),
            indent: default_indent(),
        }
    }
}

impl PreviewConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            skip_node_kinds: self.skip_node_kinds.clone(),
            include_post_mapper_output: self.include_post_mapper_output,
        }
    }

    /// Pretty-prints `value` with the configured indentation.
    pub fn render(&self, value: &Value) -> String {
        json::to_pretty_string_with_indent(value, self.indent)
    }
}
