//! Human-readable edge labels derived from conditions.
//!
//! Labels are a display default only. The evaluator never reads them, and an
//! explicit label on the edge always replaces the formatted one (see
//! [`EdgeAnnotation::display_label`](crate::condition::EdgeAnnotation::display_label)).

use crate::condition::Condition;
use crate::operator::OperatorRegistry;
use crate::trace::TraceFormatter;

/// Formats `<field> <symbol> <value>` using the global registry's symbols.
///
/// ```
/// use bunki::condition::Condition;
/// use bunki::label::format_label;
/// use serde_json::json;
///
/// assert_eq!(format_label(&Condition::new("age", "gt", json!(18))), "age > 18");
/// assert_eq!(format_label(&Condition::new("status", "ne", json!("done"))), "status != \"done\"");
/// assert_eq!(format_label(&Condition::unary("notes", "isEmpty")), "notes is empty");
/// ```
pub fn format_label(condition: &Condition) -> String {
    format_label_with(OperatorRegistry::global(), condition)
}

/// Formats a label using symbols from `registry`. Unknown operators fall back
/// to their raw id.
pub fn format_label_with(registry: &OperatorRegistry, condition: &Condition) -> String {
    let field = condition.field.trim();
    let (symbol, takes_value) = match registry.lookup(condition.operator.as_str()) {
        Ok(operator) => (
            operator.metadata().symbol.clone(),
            operator.metadata().requires_value,
        ),
        Err(_) => (condition.operator.to_string(), true),
    };

    let mut label = format!("{} {}", field, symbol);
    if takes_value {
        if let Some(value) = &condition.value {
            label.push(' ');
            label.push_str(&TraceFormatter::format_value(value));
        }
    }
    label
}
