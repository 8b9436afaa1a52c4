//! Type coercion rules shared by the built-in operators.

use serde_json::{Number, Value};
use std::borrow::Cow;

/// Lenient numeric parse used by ordering operators and the validator.
///
/// Surrounding whitespace is ignored. Empty strings, `NaN` and infinities are
/// rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric view of a value: numbers as-is, strings through [`parse_number`].
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

/// Formats a float without a trailing `.0` when it is integral.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string())
    }
}

/// Stable string conversion for string operators.
///
/// Returns `None` for values that are not coerced: null, arrays and objects.
pub fn to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_to_string(n))),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// String form used as the equality fallback. Compound values become compact
/// JSON and null becomes `"null"`.
pub fn to_loose_text(value: &Value) -> String {
    match to_text(value) {
        Some(text) => text.into_owned(),
        None => value.to_string(),
    }
}

/// Numeric value kept exact for equality. Integers never pass through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ExactNumber {
    Integer(i128),
    Float(f64),
}

impl ExactNumber {
    fn from_number(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Self::Integer(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Some(Self::Integer(i128::from(u)))
        } else {
            n.as_f64().filter(|f| f.is_finite()).map(Self::Float)
        }
    }

    fn from_text(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        match trimmed.parse::<i128>() {
            Ok(i) => Some(Self::Integer(i)),
            Err(_) => parse_number(trimmed).map(Self::Float),
        }
    }

    fn same_value(self, other: Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                f.fract() == 0.0 && f as i128 == i
            }
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (ExactNumber::from_number(a), ExactNumber::from_number(b)) {
        (Some(a), Some(b)) => a.same_value(b),
        _ => false,
    }
}

/// Equality with the cross-type coercion rules of `eq`/`ne`.
///
/// Same-type primitives compare strictly (numbers by value, so `1 == 1.0`),
/// a number and a numeric string compare numerically, arrays and objects
/// compare structurally, and everything else compares by string form.
/// Integers compare exactly, including those beyond 2^53.
pub fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match ExactNumber::from_text(s) {
                Some(parsed) => ExactNumber::from_number(n).is_some_and(|n| n.same_value(parsed)),
                None => to_loose_text(left) == to_loose_text(right),
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loosely_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| loosely_equal(x, y)))
        }
        _ => to_loose_text(left) == to_loose_text(right),
    }
}

/// Empty means null, `""`, `[]` or `{}`. Missing values are handled by the caller.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Short description of a value for mismatch messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", number_to_string(n)),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
