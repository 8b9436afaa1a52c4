use thiserror::Error;

/// Errors raised when an operator id cannot be found in a registry.
///
/// Reaching this from a persisted workflow is a programming error: the
/// validator rejects unknown operators before a condition is saved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Operator '{0}' is not registered")]
    InvalidOperator(String),

    #[error("'{0}' is already a registered operator and cannot be used as an alias")]
    AliasConflict(String),
}

/// Structural problems with a condition, reported back to the editor.
///
/// Variants are ordered the same way the validator checks them; only the first
/// violated rule is ever reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Condition field is required")]
    EmptyField,

    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("Operator '{operator}' requires a comparison value")]
    MissingValue { operator: String },

    #[error("Operator '{operator}' expects a finite number, but got {found}")]
    NotANumber { operator: String, found: String },

    #[error("Operator '{operator}' expects a list (JSON array or comma-separated), but got {found}")]
    NotAList { operator: String, found: String },

    #[error("Operator '{operator}' expects text, a number or a boolean, but got {found}")]
    NotText { operator: String, found: String },

    #[error("Operator '{operator}' expects true or false, but got {found}")]
    NotABoolean { operator: String, found: String },
}

/// Errors produced while turning raw editor input into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueParseError {
    #[error("'{0}' is not a finite number")]
    InvalidNumber(String),

    #[error("'{0}' is not a boolean (expected true or false)")]
    InvalidBoolean(String),
}

/// Reasons a condition could not be evaluated.
///
/// These never escape the evaluator as errors: an indeterminate condition
/// evaluates to `false` and the error is logged and attached to the decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error(transparent)]
    UnknownOperator(#[from] RegistryError),

    #[error(
        "Type mismatch during operation '{operator}': expected {expected}, but found {found}"
    )]
    TypeMismatch {
        operator: String,
        expected: String,
        found: String,
    },
}

/// A template reference that could not be resolved.
///
/// Not an error: the reference is substituted with an empty string and a
/// warning is logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    #[error("Empty template expression")]
    EmptyExpression,

    #[error("Template expression '{expression}' has no node id")]
    MissingNodeId { expression: String },

    #[error("No output recorded for node '{node_id}'")]
    UnknownNode { node_id: String },

    #[error("Path '{path}' not found in output of node '{node_id}'")]
    MissingPath { node_id: String, path: String },
}

/// Errors loading workflow documents and data files.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Expected a JSON object keyed by node id, but found {0}")]
    NotAnObject(String),
}
