//! Common test utilities for building workflow documents and node outputs.
use bunki::prelude::*;
use serde_json::{Value, json};

/// An order workflow: `fetch` branches on the order, and `notify` uses
/// templates that read from `fetch`.
#[allow(dead_code)]
pub const ORDER_WORKFLOW_JSON: &str = r#"{
    "nodes": [
        {"id": "fetch", "type": "httpRequest", "parameters": {"url": "https://shop.test/orders/42"}},
        {"id": "notify", "type": "email", "parameters": {
            "to": "{{fetch.customer.email}}",
            "subject": "Order {{ fetch.id }} is {{fetch.status}}",
            "body": {
                "lines": ["Hi {{fetch.customer.name}},", "Total: {{fetch.total}}"],
                "attachItems": true,
                "itemCount": 2
            }
        }},
        {"id": "review", "type": "task", "parameters": {"title": "Review {{fetch.id}} ({{fetch.total}})"}},
        {"id": "archive", "type": "storage", "parameters": {}},
        {"id": "audit", "type": "log", "parameters": {"message": "{{fetch}}"}}
    ],
    "edges": [
        {"id": "e-done", "source": "fetch", "target": "notify", "sourceHandle": "out",
         "condition": {"field": "status", "operator": "eq", "value": "done"}},
        {"id": "e-large", "source": "fetch", "target": "review",
         "condition": {"field": "total", "operator": "gt", "value": 100},
         "label": "Large order"},
        {"id": "e-empty", "source": "fetch", "target": "archive",
         "condition": {"field": "items", "operator": "isEmpty"}},
        {"id": "e-audit", "source": "fetch", "target": "audit"},
        {"id": "e-next", "source": "notify", "target": "archive"}
    ]
}"#;

#[allow(dead_code)]
pub fn order_workflow() -> WorkflowDocument {
    WorkflowDocument::from_json(ORDER_WORKFLOW_JSON).expect("Failed to parse order workflow")
}

/// The output of `fetch` for a completed order.
#[allow(dead_code)]
pub fn completed_order() -> Value {
    json!({
        "id": 42,
        "status": "done",
        "total": 149.5,
        "customer": {"name": "Ana", "email": "ana@example.com"},
        "items": [{"name": "foobar", "qty": 1}, {"name": "baz", "qty": 3}]
    })
}

/// A representative spread of node outputs, used for table-driven checks.
#[allow(dead_code)]
pub fn sample_outputs() -> Vec<Value> {
    vec![
        json!({}),
        json!({"status": "done"}),
        json!({"status": "pending"}),
        json!({"status": null}),
        json!({"status": ""}),
        json!({"status": 5}),
        json!({"status": "5"}),
        json!({"status": 5.0}),
        json!({"status": true}),
        json!({"status": "true"}),
        json!({"status": [1, 2]}),
        json!({"status": {"code": 1}}),
        json!({"status": {"code": "1"}}),
        json!([1, 2, 3]),
        json!("done"),
        json!(null),
    ]
}

/// Comparison values paired with `sample_outputs` in property checks.
#[allow(dead_code)]
pub fn sample_values() -> Vec<Value> {
    vec![
        json!("done"),
        json!(""),
        json!(5),
        json!("5"),
        json!(5.5),
        json!(true),
        json!(null),
        json!([1, 2]),
        json!({"code": 1}),
    ]
}
