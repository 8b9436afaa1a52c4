//! Evaluator tests: operator semantics, coercion and failure behavior.
mod common;
use bunki::error::EvaluationError;
use bunki::path;
use bunki::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_status_equals_done() {
    let condition = Condition::new("status", "eq", json!("done"));
    assert!(evaluate(&condition, &json!({"status": "done"})));
}

#[test]
fn test_contains_through_array_index() {
    let condition = Condition::new("items.0.name", "contains", json!("foo"));
    assert!(evaluate(&condition, &json!({"items": [{"name": "foobar"}]})));
}

#[test]
fn test_missing_path_is_empty() {
    let condition = Condition::unary("missing.path", "isEmpty");
    assert!(evaluate(&condition, &json!({})));
    assert!(!evaluate(&Condition::unary("missing.path", "isNotEmpty"), &json!({})));
}

#[test]
fn test_ne_is_negation_of_eq() {
    for output in sample_outputs() {
        for value in sample_values() {
            for field in ["status", "status.code", "0", "nowhere"] {
                let eq = Condition::new(field, "eq", value.clone());
                let ne = Condition::new(field, "ne", value.clone());
                assert_ne!(
                    evaluate(&eq, &output),
                    evaluate(&ne, &output),
                    "eq/ne agree for field {:?}, value {}, output {}",
                    field,
                    value,
                    output
                );
            }
        }
    }
}

#[test]
fn test_not_in_is_negation_of_in() {
    let list = json!(["done", 5, null]);
    for output in sample_outputs() {
        let is_in = evaluate(&Condition::new("status", "in", list.clone()), &output);
        let not_in = evaluate(&Condition::new("status", "notIn", list.clone()), &output);
        if path::resolve(&output, "status").is_found() {
            assert_ne!(is_in, not_in, "output {}", output);
        } else {
            // A missing field is in no list, and notIn still holds.
            assert!(!is_in);
            assert!(not_in);
        }
    }
}

#[test]
fn test_large_integer_ids_compare_exactly() {
    let output = json!({"id": 9007199254740992u64, "ref": "9007199254740992"});
    assert!(!evaluate(&Condition::new("id", "eq", json!(9007199254740993u64)), &output));
    assert!(evaluate(&Condition::new("id", "ne", json!(9007199254740993u64)), &output));
    assert!(evaluate(&Condition::new("id", "eq", json!(9007199254740992u64)), &output));
    assert!(!evaluate(&Condition::new("ref", "eq", json!(9007199254740993u64)), &output));
    assert!(evaluate(
        &Condition::new("id", "in", json!([1, 9007199254740992u64])),
        &output
    ));
    assert!(!evaluate(
        &Condition::new("id", "in", json!([9007199254740993u64])),
        &output
    ));
}

#[test]
fn test_equality_coercion_table() {
    let cases = [
        (json!(5), json!("5"), true),
        (json!(5), json!(" 5.0 "), true),
        (json!(5.0), json!(5), true),
        (json!("5"), json!("5.0"), false),
        (json!(true), json!("true"), true),
        (json!(false), json!(0), false),
        (json!(null), json!("null"), true),
        (json!(null), json!(""), false),
        (json!([1, "2"]), json!(["1", 2]), true),
        (json!([1, 2]), json!([2, 1]), false),
        (json!({"a": 1}), json!({"a": "1"}), true),
        (json!({"a": 1}), json!({"a": 1, "b": 2}), false),
        (json!([1, 2]), json!("[1,2]"), true),
        (json!("Done"), json!("done"), false),
    ];
    for (field_value, value, expected) in cases {
        let output = json!({ "f": field_value });
        let condition = Condition::new("f", "eq", value.clone());
        assert_eq!(
            evaluate(&condition, &output),
            expected,
            "{} == {}",
            field_value,
            value
        );
    }
}

#[test]
fn test_missing_field_equals_only_absent_value() {
    assert!(evaluate(&Condition::unary("x", "eq"), &json!({})));
    assert!(!evaluate(&Condition::new("x", "eq", json!(null)), &json!({})));
    assert!(evaluate(&Condition::new("x", "eq", json!(null)), &json!({"x": null})));
}

#[test]
fn test_ordering_is_numeric() {
    let output = json!({"age": "21", "score": 9, "name": "Ana"});
    assert!(evaluate(&Condition::new("age", "gt", json!(18)), &output));
    assert!(evaluate(&Condition::new("age", "lte", json!("21")), &output));
    // "9" < "10" as text, but 9 < 10 numerically.
    assert!(evaluate(&Condition::new("score", "lt", json!(10)), &output));
    assert!(!evaluate(&Condition::new("score", "gte", json!(10)), &output));
}

#[test]
fn test_ordering_on_non_numbers_is_indeterminate() {
    let output = json!({"name": "Ana", "flag": true});
    for field in ["name", "flag", "missing"] {
        for operator in ["gt", "gte", "lt", "lte"] {
            let decision = decide(&Condition::new(field, operator, json!(1)), &output);
            assert!(!decision.fired);
            assert!(matches!(
                decision.outcome,
                Outcome::Indeterminate(EvaluationError::TypeMismatch { .. })
            ));
        }
    }
}

#[test]
fn test_string_operators_coerce_primitives() {
    let output = json!({"code": 404, "ok": false, "tags": ["a"], "none": null});
    assert!(evaluate(&Condition::new("code", "startsWith", json!("40")), &output));
    assert!(evaluate(&Condition::new("code", "endsWith", json!(4)), &output));
    assert!(evaluate(&Condition::new("ok", "contains", json!("als")), &output));

    // Compound, null and missing operands are not coerced, even for notContains.
    for field in ["tags", "none", "missing"] {
        assert!(!evaluate(&Condition::new(field, "contains", json!("a")), &output));
        assert!(!evaluate(&Condition::new(field, "notContains", json!("zzz")), &output));
    }
}

#[test]
fn test_membership_requires_array_value() {
    let output = json!({"tier": "gold", "level": 2});
    assert!(evaluate(&Condition::new("tier", "in", json!(["silver", "gold"])), &output));
    assert!(evaluate(&Condition::new("level", "in", json!(["1", "2"])), &output));
    assert!(evaluate(&Condition::new("tier", "notIn", json!(["bronze"])), &output));

    let decision = decide(&Condition::new("tier", "in", json!("silver, gold")), &output);
    assert!(decision.is_indeterminate());
    assert!(!decision.fired);

    // Parsing the editor's raw input first yields a real list.
    let engine = Engine::default();
    let condition = engine.parse_condition("tier", "in", "silver, gold").unwrap();
    assert!(engine.evaluate(&condition, &output));
}

#[test]
fn test_existence_operators() {
    let output = json!({"s": "", "a": [], "o": {}, "n": null, "zero": 0, "no": false, "text": " "});
    for field in ["s", "a", "o", "n", "missing"] {
        assert!(evaluate(&Condition::unary(field, "isEmpty"), &output), "{}", field);
    }
    for field in ["zero", "no", "text"] {
        assert!(evaluate(&Condition::unary(field, "isNotEmpty"), &output), "{}", field);
    }
}

#[test]
fn test_unknown_operator_never_fires() {
    for output in sample_outputs() {
        let decision = decide(&Condition::new("status", "regex", json!(".*")), &output);
        assert!(!decision.fired);
        assert!(matches!(
            decision.outcome,
            Outcome::Indeterminate(EvaluationError::UnknownOperator(_))
        ));
    }
}

#[test]
fn test_validated_conditions_evaluate_on_any_output() {
    let registry = OperatorRegistry::global();
    let mut checked = 0;
    for operator in registry.operators() {
        for value in sample_values() {
            let condition = Condition::new("status", operator.id().clone(), value);
            if validate(&condition).is_err() {
                continue;
            }
            for output in sample_outputs() {
                let decision = decide(&condition, &output);
                assert_eq!(decision.fired, decision.outcome == Outcome::Matched);
                assert!(!decision.reason.is_empty());
                checked += 1;
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_field_is_trimmed() {
    let condition = Condition::new("  status ", "eq", json!("done"));
    assert!(evaluate(&condition, &json!({"status": "done"})));
}
