use super::coercion::{self, loosely_equal, to_number, to_text};
use super::{Category, Mismatch, Operator, OperatorMetadata, OperatorRegistry, ValueType};
use crate::path::Resolved;
use serde_json::Value;

/// Defines the built-in operators and the function that registers them.
macro_rules! define_operators {
    ( $( ($id:expr, $label:expr, $symbol:expr, $category:ident, requires_value: $requires:expr, value_type: $value_type:expr, $description:expr, $compare:path) ),* $(,)? ) => {
        pub(super) fn register_default_operators(registry: &mut OperatorRegistry) {
            $(
                registry.insert(Operator::new(
                    OperatorMetadata {
                        id: $id.into(),
                        label: $label.to_string(),
                        symbol: $symbol.to_string(),
                        category: Category::$category,
                        requires_value: $requires,
                        value_type: $value_type,
                        description: $description.to_string(),
                    },
                    $compare,
                ));
            )*
        }
    };
}

define_operators! {
    // Equality
    ("eq", "is equal to", "==", Equality, requires_value: true, value_type: None,
        "Field equals the value, comparing numeric strings as numbers", equals),
    ("ne", "is not equal to", "!=", Equality, requires_value: true, value_type: None,
        "Field does not equal the value", not_equals),

    // Ordering
    ("gt", "is greater than", ">", Ordering, requires_value: true, value_type: Some(ValueType::Number),
        "Field is numerically greater than the value", greater_than),
    ("gte", "is greater than or equal to", ">=", Ordering, requires_value: true, value_type: Some(ValueType::Number),
        "Field is numerically greater than or equal to the value", greater_than_or_equal),
    ("lt", "is less than", "<", Ordering, requires_value: true, value_type: Some(ValueType::Number),
        "Field is numerically less than the value", less_than),
    ("lte", "is less than or equal to", "<=", Ordering, requires_value: true, value_type: Some(ValueType::Number),
        "Field is numerically less than or equal to the value", less_than_or_equal),

    // String
    ("contains", "contains", "contains", String, requires_value: true, value_type: Some(ValueType::String),
        "Field text contains the value", contains),
    ("notContains", "does not contain", "not contains", String, requires_value: true, value_type: Some(ValueType::String),
        "Field text does not contain the value", not_contains),
    ("startsWith", "starts with", "starts with", String, requires_value: true, value_type: Some(ValueType::String),
        "Field text starts with the value", starts_with),
    ("endsWith", "ends with", "ends with", String, requires_value: true, value_type: Some(ValueType::String),
        "Field text ends with the value", ends_with),

    // Membership
    ("in", "is one of", "in", Membership, requires_value: true, value_type: Some(ValueType::Array),
        "Field equals one of the listed values", is_in),
    ("notIn", "is not one of", "not in", Membership, requires_value: true, value_type: Some(ValueType::Array),
        "Field equals none of the listed values", not_in),

    // Existence
    ("isEmpty", "is empty", "is empty", Existence, requires_value: false, value_type: None,
        "Field is missing, null, an empty string, an empty list or an empty object", is_empty),
    ("isNotEmpty", "is not empty", "is not empty", Existence, requires_value: false, value_type: None,
        "Field holds a non-empty value", is_not_empty),
}

fn required(right: Option<&Value>) -> Result<&Value, Mismatch> {
    right.ok_or_else(|| Mismatch::new("a comparison value", "none"))
}

// --- Equality ---

fn equals(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    Ok(match (left, right) {
        (Resolved::Found(l), Some(r)) => loosely_equal(l, r),
        // A missing field only equals an absent comparison value.
        (Resolved::Missing, None) => true,
        _ => false,
    })
}

fn not_equals(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    equals(left, right).map(|eq| !eq)
}

// --- Ordering ---

fn compare_numeric(
    left: Resolved<'_>,
    right: Option<&Value>,
    compare_fn: fn(f64, f64) -> bool,
) -> Result<bool, Mismatch> {
    let r = required(right)?;
    let a = left
        .value()
        .and_then(to_number)
        .ok_or_else(|| Mismatch::operand("a number", left))?;
    let b = to_number(r).ok_or_else(|| Mismatch::new("a number", coercion::describe(r)))?;
    Ok(compare_fn(a, b))
}

fn greater_than(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_numeric(left, right, |a, b| a > b)
}

fn greater_than_or_equal(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_numeric(left, right, |a, b| a >= b)
}

fn less_than(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_numeric(left, right, |a, b| a < b)
}

fn less_than_or_equal(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_numeric(left, right, |a, b| a <= b)
}

// --- String ---

fn compare_text(
    left: Resolved<'_>,
    right: Option<&Value>,
    compare_fn: fn(&str, &str) -> bool,
) -> Result<bool, Mismatch> {
    let r = required(right)?;
    let a = left
        .value()
        .and_then(to_text)
        .ok_or_else(|| Mismatch::operand("text", left))?;
    let b = to_text(r).ok_or_else(|| Mismatch::new("text", coercion::describe(r)))?;
    Ok(compare_fn(&a, &b))
}

fn contains(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_text(left, right, |a, b| a.contains(b))
}

fn not_contains(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_text(left, right, |a, b| !a.contains(b))
}

fn starts_with(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_text(left, right, |a, b| a.starts_with(b))
}

fn ends_with(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    compare_text(left, right, |a, b| a.ends_with(b))
}

// --- Membership ---

fn membership(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    let r = required(right)?;
    let Value::Array(items) = r else {
        return Err(Mismatch::new("an array", coercion::describe(r)));
    };
    Ok(match left {
        Resolved::Found(l) => items.iter().any(|item| loosely_equal(l, item)),
        Resolved::Missing => false,
    })
}

fn is_in(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    membership(left, right)
}

fn not_in(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    membership(left, right).map(|found| !found)
}

// --- Existence ---

fn is_empty(left: Resolved<'_>, _right: Option<&Value>) -> Result<bool, Mismatch> {
    Ok(match left {
        Resolved::Found(value) => coercion::is_empty(value),
        Resolved::Missing => true,
    })
}

fn is_not_empty(left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
    is_empty(left, right).map(|empty| !empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn found(value: &Value) -> Resolved<'_> {
        Resolved::Found(value)
    }

    #[test]
    fn test_registry_holds_every_builtin() {
        let registry = OperatorRegistry::with_defaults();
        for id in [
            "eq", "ne", "gt", "gte", "lt", "lte", "contains", "notContains", "startsWith",
            "endsWith", "in", "notIn", "isEmpty", "isNotEmpty",
        ] {
            assert!(registry.contains(id), "missing operator {}", id);
        }
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn test_ordering_rejects_non_numeric_operands() {
        let text = json!("abc");
        assert!(greater_than(found(&text), Some(&json!(1))).is_err());
        assert!(greater_than(found(&json!(5)), Some(&json!("x"))).is_err());
        assert!(greater_than(Resolved::Missing, Some(&json!(1))).is_err());
        assert_eq!(greater_than(found(&json!(" 10 ")), Some(&json!(5))), Ok(true));
        assert_eq!(less_than_or_equal(found(&json!(5)), Some(&json!("5"))), Ok(true));
    }

    #[test]
    fn test_string_operators_do_not_coerce_objects() {
        let object = json!({"a": 1});
        assert!(contains(found(&object), Some(&json!("a"))).is_err());
        assert!(not_contains(found(&object), Some(&json!("a"))).is_err());
        assert_eq!(contains(found(&json!(12345)), Some(&json!(234))), Ok(true));
        assert_eq!(starts_with(found(&json!(true)), Some(&json!("tr"))), Ok(true));
        assert_eq!(ends_with(found(&json!(2.0)), Some(&json!("2"))), Ok(true));
    }

    #[test]
    fn test_membership_requires_an_array() {
        assert!(is_in(found(&json!("a")), Some(&json!("a,b"))).is_err());
        assert_eq!(is_in(found(&json!("2")), Some(&json!([1, 2, 3]))), Ok(true));
        assert_eq!(not_in(found(&json!(4)), Some(&json!([1, 2, 3]))), Ok(true));
        assert_eq!(is_in(Resolved::Missing, Some(&json!([null]))), Ok(false));
    }

    #[test]
    fn test_missing_field_equality() {
        assert_eq!(equals(Resolved::Missing, None), Ok(true));
        assert_eq!(equals(Resolved::Missing, Some(&json!(null))), Ok(false));
        assert_eq!(not_equals(Resolved::Missing, Some(&json!("x"))), Ok(true));
    }
}
