//! Persisted condition and edge annotation types.

use crate::error::ValidationError;
use crate::label;
use crate::operator::{OperatorId, OperatorRegistry};
use crate::parse;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A test applied to a node's output to decide whether an edge fires.
///
/// Unknown JSON fields are ignored so that documents written by newer editors
/// still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: OperatorId,
    /// `None` when the key is absent; an explicit JSON `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: impl Into<OperatorId>, value: Value) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: Some(value),
        }
    }

    /// A condition for an operator that takes no comparison value, such as `isEmpty`.
    pub fn unary(field: impl Into<String>, operator: impl Into<OperatorId>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: None,
        }
    }

    /// Builds a typed condition from the editor's raw text input.
    ///
    /// The raw value is parsed according to the operator's declared value
    /// type. Blank input, or input for an operator that takes no value,
    /// produces a condition without a value.
    pub fn from_raw(
        registry: &OperatorRegistry,
        field: &str,
        operator: &str,
        raw_value: &str,
    ) -> Result<Self, ValidationError> {
        let metadata = registry
            .lookup(operator)
            .map_err(|_| ValidationError::UnknownOperator(operator.to_string()))?
            .metadata();

        let value = if !metadata.requires_value || raw_value.trim().is_empty() {
            None
        } else {
            let parsed = parse::parse_value(raw_value, metadata.value_type).map_err(|e| {
                parse::to_validation_error(e, operator)
            })?;
            Some(parsed)
        };

        Ok(Self {
            field: field.trim().to_string(),
            operator: OperatorId::from(operator),
            value,
        })
    }
}

/// Data attached to a graph edge.
///
/// An edge without a condition always fires.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EdgeAnnotation {
    pub fn is_unconditional(&self) -> bool {
        self.condition.is_none()
    }

    /// The label to show on the canvas.
    ///
    /// An explicit, non-blank label always wins over the formatted condition.
    pub fn display_label(&self) -> Option<String> {
        match (&self.label, &self.condition) {
            (Some(label), _) if !label.trim().is_empty() => Some(label.clone()),
            (_, Some(condition)) => Some(label::format_label(condition)),
            _ => None,
        }
    }
}
