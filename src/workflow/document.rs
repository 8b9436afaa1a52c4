use super::outputs::RunOutputs;
use crate::condition::EdgeAnnotation;
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A node as stored in the workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    #[serde(rename = "type", alias = "nodeType", default)]
    pub node_type: String,
    /// Free-form parameters; string leaves may contain `{{ }}` expressions.
    #[serde(default)]
    pub parameters: Value,
}

/// An edge between two nodes, with its optional condition and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, alias = "sourceHandle", skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, alias = "targetHandle", skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(flatten)]
    pub annotation: EdgeAnnotation,
}

/// The persisted graph: nodes plus edges in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
    #[serde(default)]
    pub edges: Vec<EdgeDefinition>,
}

impl WorkflowDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a workflow document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn node(&self, id: &str) -> Option<&NodeDefinition> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edges leaving `node_id`, in declaration order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a EdgeDefinition> {
        self.edges.iter().filter(move |edge| edge.source == node_id)
    }

    /// The parameters of `node_id` with every template resolved against `outputs`.
    pub fn bind_node(&self, node_id: &str, outputs: &RunOutputs) -> Option<Value> {
        self.node(node_id)
            .map(|node| outputs.bind_parameters(&node.parameters))
    }
}
