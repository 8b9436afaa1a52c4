//! The boundary between the editor's string inputs and typed comparison values.

use crate::error::{ValidationError, ValueParseError};
use crate::operator::ValueType;
use crate::operator::coercion::parse_number;
use serde_json::{Number, Value};

/// Parses raw editor input into a typed value for an operator's `value_type`.
///
/// - `number`: a finite number; integral values become JSON integers.
/// - `boolean`: `true` or `false`, case-insensitive.
/// - `array`: see [`parse_list`].
/// - `string`: the raw text, verbatim.
/// - untyped (equality operators): `true`/`false`/`null`, then a number,
///   otherwise the raw text.
pub fn parse_value(raw: &str, value_type: Option<ValueType>) -> Result<Value, ValueParseError> {
    match value_type {
        Some(ValueType::Number) => parse_number(raw)
            .map(number_value)
            .ok_or_else(|| ValueParseError::InvalidNumber(raw.to_string())),
        Some(ValueType::Boolean) => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| ValueParseError::InvalidBoolean(raw.to_string())),
        Some(ValueType::Array) => Ok(Value::Array(parse_list(raw))),
        Some(ValueType::String) => Ok(Value::String(raw.to_string())),
        None => Ok(parse_untyped(raw)),
    }
}

/// Parses a list literal.
///
/// Input that parses as a JSON array is used as-is. Anything else falls back
/// to splitting on commas with each item trimmed and kept as a string. The
/// fallback does not understand quoting, so a malformed JSON literal with
/// commas inside quoted strings is split at those commas.
pub fn parse_list(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
        return items;
    }
    trimmed
        .split(',')
        .map(|item| Value::String(item.trim().to_string()))
        .collect()
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_untyped(raw: &str) -> Value {
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    if raw.trim() == "null" {
        return Value::Null;
    }
    match parse_number(raw) {
        Some(n) => number_value(n),
        None => Value::String(raw.to_string()),
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Attaches the operator id to a parse error for the editor.
pub(crate) fn to_validation_error(error: ValueParseError, operator: &str) -> ValidationError {
    match error {
        ValueParseError::InvalidNumber(raw) => ValidationError::NotANumber {
            operator: operator.to_string(),
            found: format!("{:?}", raw),
        },
        ValueParseError::InvalidBoolean(raw) => ValidationError::NotABoolean {
            operator: operator.to_string(),
            found: format!("{:?}", raw),
        },
    }
}
