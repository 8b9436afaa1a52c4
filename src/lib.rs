//! # Bunki - Branching and Expression Core for Node-Graph Workflows
//!
//! **Bunki** decides which edges of a workflow graph fire after a node has run,
//! and fills `{{ nodeId.field }}` expressions in downstream node parameters with
//! the outputs of upstream nodes. It is the data-flow and control-flow core of a
//! visual workflow editor; rendering, credentials and the execution runtime are
//! left to the host application.
//!
//! ## Core Workflow
//!
//! 1.  **Author**: The editor builds [`Condition`](condition::Condition)s from user input
//!     with `Condition::from_raw` and checks them with [`validate`](validate::validate)
//!     before saving. Labels for the canvas come from [`format_label`](label::format_label).
//! 2.  **Route**: After a node runs, the runtime records its output in
//!     [`RunOutputs`](workflow::RunOutputs) and calls
//!     [`select_branches`](workflow::select_branches) to learn which outgoing edges fire.
//! 3.  **Bind**: Before a fired target runs, its parameters are passed through
//!     [`RunOutputs::bind_parameters`](workflow::RunOutputs::bind_parameters), which
//!     resolves every template expression against the outputs collected so far.
//!
//! Evaluation and template resolution never fail. A condition that cannot be
//! evaluated does not fire, an unresolved expression becomes an empty string, and
//! both are reported through `tracing` at `warn` level.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let document = WorkflowDocument::from_file("workflow.json")?;
//!     let engine = Engine::builder()
//!         .with_operator_alias("equals", "eq")
//!         .build();
//!
//!     // The runtime executed "fetch" and produced this output.
//!     let output = json!({ "status": "done", "user": { "name": "Ana" } });
//!     let mut outputs = RunOutputs::new();
//!     outputs.record("fetch", output.clone());
//!
//!     for branch in engine.select_branches(&document, "fetch", &output) {
//!         println!("{} -> {}: {}", branch.edge_index, branch.target, branch.reason);
//!         if branch.fired {
//!             if let Some(parameters) = document.bind_node(&branch.target, &outputs) {
//!                 println!("   parameters: {}", parameters);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod label;
pub mod operator;
pub mod parse;
pub mod path;
pub mod prelude;
pub mod template;
pub mod trace;
pub mod validate;
pub mod workflow;
