use crate::operator::coercion::number_to_string;
use crate::path::Resolved;
use serde_json::Value;

/// Formats condition evaluations into human-readable explanations.
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a decision, e.g. `status (was "done") == "done"`.
    ///
    /// `value` is omitted for operators that take none. `note` is appended in
    /// brackets, used to explain indeterminate results.
    pub fn format_decision(
        field: &str,
        operand: Resolved<'_>,
        symbol: &str,
        value: Option<&Value>,
        note: Option<&str>,
    ) -> String {
        let mut result = Self::format_operand(field, operand);
        result.push(' ');
        result.push_str(symbol);
        if let Some(value) = value {
            result.push(' ');
            result.push_str(&Self::format_value(value));
        }
        if let Some(note) = note {
            result.push_str(&format!(" [{}]", note));
        }
        result
    }

    /// Format the left-hand side with the value it resolved to.
    pub fn format_operand(field: &str, operand: Resolved<'_>) -> String {
        match operand {
            Resolved::Found(value) => format!("{} (was {})", field, Self::format_value(value)),
            Resolved::Missing => format!("{} (missing)", field),
        }
    }

    /// Format a value for display: strings quoted, numbers without a trailing
    /// `.0`, compound values as compact JSON.
    pub fn format_value(value: &Value) -> String {
        match value {
            Value::Number(n) => number_to_string(n),
            other => other.to_string(),
        }
    }
}
