//! Workflow documents, per-run outputs and branch routing.
//!
//! A run executes a node, records its output in [`RunOutputs`], asks
//! [`select_branches`] which outgoing edges fire, and binds each fired target's
//! parameters with [`RunOutputs::bind_parameters`] before executing it.

mod document;
mod outputs;
mod routing;

pub use document::{EdgeDefinition, NodeDefinition, WorkflowDocument};
pub use outputs::RunOutputs;
pub use routing::{BranchDecision, select_branches, select_branches_with};

