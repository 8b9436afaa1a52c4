//! `{{ nodeId.path }}` template expressions in node parameters.
//!
//! Templates are scanned once, left to right. Each expression is split on its
//! first `.` or `[` into a node id and a field path, the node's output is looked up,
//! and the path is resolved with the same grammar as edge conditions. Resolved
//! values are never rescanned, so a node output containing `{{ }}` cannot
//! trigger further substitution.

use crate::error::UnresolvedReference;
use crate::operator::coercion::number_to_string;
use crate::path::{FieldPath, Resolved};
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use tracing::warn;

mod scanner;

use scanner::{Piece, scan};

/// Read access to the outputs of nodes that have already run, keyed by node id.
pub trait OutputLookup {
    fn output(&self, node_id: &str) -> Option<&Value>;
}

impl<S: BuildHasher> OutputLookup for HashMap<String, Value, S> {
    fn output(&self, node_id: &str) -> Option<&Value> {
        self.get(node_id)
    }
}

impl OutputLookup for AHashMap<String, Value> {
    fn output(&self, node_id: &str) -> Option<&Value> {
        self.get(node_id)
    }
}

impl OutputLookup for serde_json::Map<String, Value> {
    fn output(&self, node_id: &str) -> Option<&Value> {
        self.get(node_id)
    }
}

/// A parsed `nodeId.path` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub node_id: String,
    pub path: FieldPath,
}

impl Reference {
    /// Parses the text between the delimiters.
    ///
    /// The node id ends at the first `.` or `[`, so `n1[0].x` names node `n1`
    /// with path `0.x`. A blank expression or one without a node id, such as
    /// `.a`, is an error.
    pub fn parse(expression: &str) -> Result<Self, UnresolvedReference> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(UnresolvedReference::EmptyExpression);
        }
        let (node_id, path) = match trimmed.find(['.', '[']) {
            Some(i) => {
                let (node_id, rest) = trimmed.split_at(i);
                (node_id, rest.strip_prefix('.').unwrap_or(rest))
            }
            None => (trimmed, ""),
        };
        let node_id = node_id.trim();
        if node_id.is_empty() {
            return Err(UnresolvedReference::MissingNodeId {
                expression: trimmed.to_string(),
            });
        }
        Ok(Self {
            node_id: node_id.to_string(),
            path: FieldPath::parse(path),
        })
    }

    /// Resolves the reference against recorded outputs.
    pub fn resolve<'a, O>(&self, outputs: &'a O) -> Result<&'a Value, UnresolvedReference>
    where
        O: OutputLookup + ?Sized,
    {
        let output = outputs
            .output(&self.node_id)
            .ok_or_else(|| UnresolvedReference::UnknownNode {
                node_id: self.node_id.clone(),
            })?;
        match self.path.resolve(output) {
            Resolved::Found(value) => Ok(value),
            Resolved::Missing => Err(UnresolvedReference::MissingPath {
                node_id: self.node_id.clone(),
                path: self.path.to_string(),
            }),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.node_id)
        } else {
            write!(f, "{}.{}", self.node_id, self.path)
        }
    }
}

/// A rendered template and the references that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub unresolved: Vec<UnresolvedReference>,
}

impl Rendered {
    /// `true` when every expression resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Renders `template` against `outputs`.
///
/// Unresolved expressions become empty strings; each one is logged at `warn`
/// level and reported in [`Rendered::unresolved`]. Rendering never fails.
pub fn render<O>(template: &str, outputs: &O) -> Rendered
where
    O: OutputLookup + ?Sized,
{
    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();

    for piece in scan(template) {
        match piece {
            Piece::Literal(literal) => text.push_str(literal),
            Piece::Expression(expression) => {
                let resolved =
                    Reference::parse(expression).and_then(|reference| reference.resolve(outputs));
                match resolved {
                    Ok(value) => text.push_str(&format_output(value)),
                    Err(reason) => {
                        warn!(
                            expression = expression.trim(),
                            reason = %reason,
                            "Template expression unresolved; substituting empty string"
                        );
                        unresolved.push(reason);
                    }
                }
            }
        }
    }

    Rendered { text, unresolved }
}

/// Resolves every `{{ }}` expression in `template`, substituting unresolved
/// ones with an empty string.
///
/// ```
/// use bunki::template::resolve_template;
/// use serde_json::{json, Map};
///
/// let mut outputs = Map::new();
/// outputs.insert("n1".to_string(), json!({ "user": { "name": "Ana" } }));
///
/// assert_eq!(resolve_template("Hello {{n1.user.name}}!", &outputs), "Hello Ana!");
/// assert_eq!(resolve_template("{{n1.missing}}", &outputs), "");
/// ```
pub fn resolve_template<O>(template: &str, outputs: &O) -> String
where
    O: OutputLookup + ?Sized,
{
    render(template, outputs).text
}

/// Lists the references in `template`, in order of appearance, skipping empty expressions.
pub fn references(template: &str) -> Vec<Reference> {
    scan(template)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Expression(expression) => Reference::parse(expression).ok(),
            Piece::Literal(_) => None,
        })
        .collect()
}

/// The distinct node ids `template` depends on, in order of first appearance.
pub fn referenced_nodes(template: &str) -> Vec<String> {
    references(template)
        .into_iter()
        .map(|reference| reference.node_id)
        .unique()
        .collect()
}

/// Formats a resolved value for substitution into text.
///
/// Strings are inserted as-is, numbers and booleans in their natural form,
/// null as an empty string, arrays and objects as compact JSON.
pub fn format_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
