//! Validation tests for conditions authored in the editor.
mod common;
use bunki::error::ValidationError;
use bunki::prelude::*;
use serde_json::json;

#[test]
fn test_empty_field_is_rejected() {
    let condition: Condition =
        serde_json::from_value(json!({"field": "", "operator": "eq", "value": "x"})).unwrap();
    let report = ValidationReport::from(validate(&condition));
    assert!(!report.valid);
    assert!(report.error.as_deref().unwrap_or_default().contains("field"));

    let serialized = serde_json::to_value(&report).unwrap();
    assert_eq!(serialized["valid"], json!(false));
    assert!(serialized["error"].as_str().unwrap().contains("field"));
}

#[test]
fn test_valid_report_has_no_error_key() {
    let report = ValidationReport::from(validate(&Condition::new("a", "eq", json!(1))));
    assert_eq!(serde_json::to_value(&report).unwrap(), json!({"valid": true}));
}

#[test]
fn test_every_builtin_accepts_a_well_typed_value() {
    let cases = [
        ("eq", Some(json!("x"))),
        ("ne", Some(json!(3))),
        ("gt", Some(json!(1))),
        ("gte", Some(json!("1.5"))),
        ("lt", Some(json!(-2))),
        ("lte", Some(json!(0))),
        ("contains", Some(json!("a"))),
        ("notContains", Some(json!("a"))),
        ("startsWith", Some(json!("a"))),
        ("endsWith", Some(json!(true))),
        ("in", Some(json!(["a"]))),
        ("notIn", Some(json!("a,b"))),
        ("isEmpty", None),
        ("isNotEmpty", None),
    ];
    for (operator, value) in cases {
        let condition = match value {
            Some(value) => Condition::new("f", operator, value),
            None => Condition::unary("f", operator),
        };
        assert_eq!(validate(&condition), Ok(()), "{}", operator);
    }
}

#[test]
fn test_value_required_for_comparison_operators() {
    for operator in ["eq", "ne", "gt", "contains", "in"] {
        let condition = Condition::unary("f", operator);
        assert_eq!(
            validate(&condition),
            Err(ValidationError::MissingValue {
                operator: operator.to_string()
            })
        );
    }
}

#[test]
fn test_null_value_is_present_for_equality() {
    assert!(validate(&Condition::new("f", "eq", json!(null))).is_ok());
    assert!(matches!(
        validate(&Condition::new("f", "gt", json!(null))),
        Err(ValidationError::NotANumber { .. })
    ));
}

#[test]
fn test_engine_validates_against_its_registry() {
    let engine = Engine::builder().with_operator_alias("above", "gt").build();
    assert!(engine.validate(&Condition::new("f", "above", json!(3))).is_ok());
    assert!(matches!(
        engine.validate(&Condition::new("f", "above", json!("three"))),
        Err(ValidationError::NotANumber { .. })
    ));
    assert_eq!(
        validate(&Condition::new("f", "above", json!(3))),
        Err(ValidationError::UnknownOperator("above".to_string()))
    );
}

#[test]
fn test_validation_error_messages() {
    let messages = [
        (ValidationError::EmptyField.to_string(), "field"),
        (
            ValidationError::UnknownOperator("regex".to_string()).to_string(),
            "regex",
        ),
        (
            ValidationError::MissingValue {
                operator: "gt".to_string(),
            }
            .to_string(),
            "gt",
        ),
    ];
    for (message, needle) in messages {
        assert!(message.contains(needle), "{:?} should mention {:?}", message, needle);
    }
}
