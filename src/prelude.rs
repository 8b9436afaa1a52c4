//! Prelude module for convenient imports
//!
//! Re-exports the types most hosts need to author conditions, route branches and
//! bind node parameters.
//!
//! # Example
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = WorkflowDocument::from_file("path/to/workflow.json")?;
//! let outputs = RunOutputs::from_file("path/to/outputs.json")?;
//!
//! if let Some(output) = outputs.get("check") {
//!     for branch in select_branches(&document, "check", output) {
//!         println!("{}: {}", branch.target, branch.fired);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Conditions and edges
pub use crate::condition::{Condition, EdgeAnnotation};
pub use crate::operator::{Category, Comparator, OperatorId, OperatorMetadata, OperatorRegistry};

// Evaluation, validation and labels
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::evaluator::{Decision, Evaluator, Outcome, decide, evaluate};
pub use crate::label::format_label;
pub use crate::validate::{ValidationReport, validate};

// Templates and workflows
pub use crate::path::{FieldPath, Resolved};
pub use crate::template::{OutputLookup, Rendered, resolve_template};
pub use crate::workflow::{BranchDecision, RunOutputs, WorkflowDocument, select_branches};

// Error types
pub use crate::error::{DocumentError, EvaluationError, RegistryError, ValidationError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
