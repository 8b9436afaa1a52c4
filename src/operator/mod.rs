//! The operator registry: a lookup table of comparison operators.
//!
//! Every operator is a record pairing its [`OperatorMetadata`] with a
//! [`Comparator`]. The evaluator never branches on operator ids; it looks the
//! operator up and calls its comparator, so new operators can be registered
//! without touching evaluation code.

use crate::error::RegistryError;
use crate::path::Resolved;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

mod builtin;
pub mod coercion;

/// Identifier of an operator as persisted in workflow documents (`"eq"`, `"isEmpty"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(String);

impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OperatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OperatorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Groups operators in the editor's picker. Carries no runtime behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Equality,
    Ordering,
    String,
    Membership,
    Existence,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Equality => "equality",
            Category::Ordering => "ordering",
            Category::String => "string",
            Category::Membership => "membership",
            Category::Existence => "existence",
        };
        f.pad(name)
    }
}

/// The shape an operator expects its comparison value to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
        };
        f.pad(name)
    }
}

/// Static description of an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorMetadata {
    pub id: OperatorId,
    pub label: String,
    /// Short form used in edge labels, e.g. `>=` or `contains`.
    pub symbol: String,
    pub category: Category,
    pub requires_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    pub description: String,
}

/// Why a comparator could not reach a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: &'static str,
    pub found: String,
}

impl Mismatch {
    pub fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }

    /// Mismatch for an operand that was resolved (or not) from the node output.
    pub fn operand(expected: &'static str, operand: Resolved<'_>) -> Self {
        let found = match operand {
            Resolved::Found(value) => coercion::describe(value),
            Resolved::Missing => "a missing field".to_string(),
        };
        Self::new(expected, found)
    }
}

/// The comparison function behind an operator.
///
/// `left` is the field resolved from the node output; `right` is the
/// condition's comparison value, if any.
pub trait Comparator: Send + Sync {
    fn compare(&self, left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch>;
}

impl<F> Comparator for F
where
    F: Fn(Resolved<'_>, Option<&Value>) -> Result<bool, Mismatch> + Send + Sync,
{
    fn compare(&self, left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
        self(left, right)
    }
}

/// A registered operator.
#[derive(Clone)]
pub struct Operator {
    metadata: OperatorMetadata,
    comparator: Arc<dyn Comparator>,
}

impl Operator {
    pub fn new(metadata: OperatorMetadata, comparator: impl Comparator + 'static) -> Self {
        Self {
            metadata,
            comparator: Arc::new(comparator),
        }
    }

    pub fn metadata(&self) -> &OperatorMetadata {
        &self.metadata
    }

    pub fn id(&self) -> &OperatorId {
        &self.metadata.id
    }

    pub fn compare(&self, left: Resolved<'_>, right: Option<&Value>) -> Result<bool, Mismatch> {
        self.comparator.compare(left, right)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

static DEFAULT_REGISTRY: LazyLock<OperatorRegistry> = LazyLock::new(OperatorRegistry::with_defaults);

/// Catalog of operators, keyed by id.
///
/// Aliases resolve to the operator they point at; only canonical ids are
/// listed by [`OperatorRegistry::list_by_category`].
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    operators: AHashMap<String, Arc<Operator>>,
    order: Vec<OperatorId>,
}

impl OperatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in operator set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        builtin::register_default_operators(&mut registry);
        registry
    }

    /// The process-wide registry of built-in operators.
    pub fn global() -> &'static OperatorRegistry {
        &DEFAULT_REGISTRY
    }

    /// Registers an operator, replacing any operator with the same id.
    pub fn insert(&mut self, operator: Operator) {
        let id = operator.id().clone();
        if !self.order.contains(&id) {
            self.order.push(id.clone());
        }
        self.operators.insert(id.0, Arc::new(operator));
    }

    /// Makes `alias` resolve to the operator registered as `target`.
    ///
    /// Canonical ids cannot be aliased; an existing alias may be repointed.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        if self.order.iter().any(|id| id.as_str() == alias) {
            return Err(RegistryError::AliasConflict(alias.to_string()));
        }
        let operator = self
            .operators
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::InvalidOperator(target.to_string()))?;
        self.operators.insert(alias.to_string(), operator);
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Result<&Operator, RegistryError> {
        self.operators
            .get(id)
            .map(|operator| operator.as_ref())
            .ok_or_else(|| RegistryError::InvalidOperator(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.operators.contains_key(id)
    }

    /// Canonical operators in registration order.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.order
            .iter()
            .filter_map(|id| self.operators.get(id.as_str()))
            .map(|operator| operator.as_ref())
    }

    /// Operator ids grouped by category, in registration order within each group.
    pub fn list_by_category(&self) -> BTreeMap<Category, Vec<OperatorId>> {
        let mut groups: BTreeMap<Category, Vec<OperatorId>> = BTreeMap::new();
        for operator in self.operators() {
            groups
                .entry(operator.metadata.category)
                .or_default()
                .push(operator.id().clone());
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Looks up an operator in the global registry.
pub fn lookup(id: &str) -> Result<&'static Operator, RegistryError> {
    OperatorRegistry::global().lookup(id)
}

/// Lists the global registry's operators by category.
pub fn list_by_category() -> BTreeMap<Category, Vec<OperatorId>> {
    OperatorRegistry::global().list_by_category()
}
