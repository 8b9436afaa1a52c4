use crate::condition::Condition;
use crate::error::{RegistryError, ValidationError};
use crate::evaluator::{Decision, Evaluator};
use crate::label;
use crate::operator::{Category, Comparator, Operator, OperatorId, OperatorMetadata, OperatorRegistry};
use crate::validate;
use crate::workflow::{self, BranchDecision, WorkflowDocument};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Branching core bound to one operator registry.
///
/// Use [`Engine::default`] for the built-in operators, or [`Engine::builder`]
/// to add aliases and custom operators.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: OperatorRegistry,
}

pub struct EngineBuilder {
    registry: OperatorRegistry,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            registry: OperatorRegistry::with_defaults(),
        }
    }

    /// Makes the user-facing id `alias` behave like the operator `target`.
    ///
    /// An unknown target, or an alias that names a registered operator, is
    /// skipped with a warning.
    pub fn with_operator_alias(mut self, alias: &str, target: &str) -> Self {
        if let Err(e) = self.registry.alias(alias, target) {
            warn!(alias, error = %e, "Operator alias not registered");
        }
        self
    }

    /// Registers a custom operator, replacing any operator with the same id.
    pub fn with_custom_operator(
        mut self,
        metadata: OperatorMetadata,
        comparator: impl Comparator + 'static,
    ) -> Self {
        self.registry.insert(Operator::new(metadata, comparator));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            registry: self.registry,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn lookup(&self, id: &str) -> Result<&Operator, RegistryError> {
        self.registry.lookup(id)
    }

    pub fn list_by_category(&self) -> BTreeMap<Category, Vec<OperatorId>> {
        self.registry.list_by_category()
    }

    fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.registry)
    }

    pub fn evaluate(&self, condition: &Condition, output: &Value) -> bool {
        self.evaluator().evaluate(condition, output)
    }

    pub fn decide(&self, condition: &Condition, output: &Value) -> Decision {
        self.evaluator().decide(condition, output)
    }

    pub fn validate(&self, condition: &Condition) -> Result<(), ValidationError> {
        validate::validate_with(&self.registry, condition)
    }

    pub fn format_label(&self, condition: &Condition) -> String {
        label::format_label_with(&self.registry, condition)
    }

    /// Builds a typed condition from raw editor input.
    pub fn parse_condition(
        &self,
        field: &str,
        operator: &str,
        raw_value: &str,
    ) -> Result<Condition, ValidationError> {
        Condition::from_raw(&self.registry, field, operator, raw_value)
    }

    pub fn select_branches(
        &self,
        document: &WorkflowDocument,
        node_id: &str,
        output: &Value,
    ) -> Vec<BranchDecision> {
        workflow::select_branches_with(&self.registry, document, node_id, output)
    }
}
