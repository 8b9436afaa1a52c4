//! Structural validation of conditions before they are saved.

use crate::condition::Condition;
use crate::error::ValidationError;
use crate::operator::coercion::{describe, to_number};
use crate::operator::{OperatorRegistry, ValueType};
use crate::parse::parse_bool;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation result in the shape the editor consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Validates `condition` against the global registry.
///
/// ```
/// use bunki::condition::Condition;
/// use bunki::validate::validate;
/// use serde_json::json;
///
/// assert!(validate(&Condition::new("status", "eq", json!("done"))).is_ok());
/// assert!(validate(&Condition::new("", "eq", json!("x"))).is_err());
/// ```
pub fn validate(condition: &Condition) -> Result<(), ValidationError> {
    validate_with(OperatorRegistry::global(), condition)
}

/// Validates `condition` against `registry`.
///
/// Rules are checked in order and the first violation is returned:
/// 1. the field is non-empty after trimming;
/// 2. the operator is registered;
/// 3. an operator that requires a value has one, shaped like its value type.
///
/// The condition is never repaired.
pub fn validate_with(
    registry: &OperatorRegistry,
    condition: &Condition,
) -> Result<(), ValidationError> {
    if condition.field.trim().is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let operator_id = condition.operator.as_str();
    let operator = registry
        .lookup(operator_id)
        .map_err(|_| ValidationError::UnknownOperator(operator_id.to_string()))?;
    let metadata = operator.metadata();

    if !metadata.requires_value {
        return Ok(());
    }

    let value = match &condition.value {
        None => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => Some(value),
    };
    let Some(value) = value else {
        return Err(ValidationError::MissingValue {
            operator: operator_id.to_string(),
        });
    };

    match metadata.value_type {
        Some(ValueType::Number) if to_number(value).is_none() => {
            Err(ValidationError::NotANumber {
                operator: operator_id.to_string(),
                found: describe(value),
            })
        }
        Some(ValueType::Array) if !is_list(value) => Err(ValidationError::NotAList {
            operator: operator_id.to_string(),
            found: describe(value),
        }),
        Some(ValueType::String) if !is_primitive(value) => Err(ValidationError::NotText {
            operator: operator_id.to_string(),
            found: describe(value),
        }),
        Some(ValueType::Boolean) if !is_boolean(value) => Err(ValidationError::NotABoolean {
            operator: operator_id.to_string(),
            found: describe(value),
        }),
        _ => Ok(()),
    }
}

/// Arrays, and strings the list parser accepts (any non-blank string).
fn is_list(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::String(_))
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn is_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => parse_bool(s).is_some(),
        _ => false,
    }
}
