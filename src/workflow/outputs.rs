use crate::error::DocumentError;
use crate::operator::coercion::describe;
use crate::template::{self, OutputLookup, Rendered};
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Outputs of the nodes that have run so far, keyed by node id.
///
/// Grows over a single run; resolution functions only read from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutputs {
    outputs: AHashMap<String, Value>,
}

impl RunOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `output` for `node_id`, replacing any earlier output.
    pub fn record(&mut self, node_id: impl Into<String>, output: Value) {
        self.outputs.insert(node_id.into(), output);
    }

    pub fn get(&self, node_id: &str) -> Option<&Value> {
        self.outputs.get(node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.outputs.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Builds outputs from a JSON object keyed by node id.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str(json)? {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(DocumentError::NotAnObject(describe(&other))),
        }
    }

    /// Load outputs from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn render(&self, template: &str) -> Rendered {
        template::render(template, self)
    }

    pub fn resolve(&self, template: &str) -> String {
        template::resolve_template(template, self)
    }

    /// Resolves every string inside `parameters`.
    ///
    /// Non-string values are copied unchanged, as are object keys.
    pub fn bind_parameters(&self, parameters: &Value) -> Value {
        match parameters {
            Value::String(s) => Value::String(self.resolve(s)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.bind_parameters(item)).collect())
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.bind_parameters(value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl OutputLookup for RunOutputs {
    fn output(&self, node_id: &str) -> Option<&Value> {
        self.get(node_id)
    }
}

impl From<Map<String, Value>> for RunOutputs {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            outputs: map.into_iter().collect(),
        }
    }
}

impl FromIterator<(String, Value)> for RunOutputs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            outputs: iter.into_iter().collect(),
        }
    }
}
