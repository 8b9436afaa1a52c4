use crate::condition::Condition;
use crate::error::EvaluationError;
use crate::operator::OperatorRegistry;
use crate::path::{self, Resolved};
use crate::trace::TraceFormatter;
use serde_json::Value;
use tracing::warn;

/// How a condition evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotMatched,
    /// The condition could not be evaluated. Treated as not matched.
    Indeterminate(EvaluationError),
}

/// The result of evaluating one condition against one node output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the edge fires. Only `Outcome::Matched` fires.
    pub fired: bool,
    pub outcome: Outcome,
    /// A human-readable explanation, e.g. `status (was "done") == "done"`.
    pub reason: String,
}

impl Decision {
    pub fn is_indeterminate(&self) -> bool {
        matches!(self.outcome, Outcome::Indeterminate(_))
    }
}

/// Evaluates conditions against node outputs using an operator registry.
///
/// Evaluation is total: it never panics or returns an error. A condition that
/// cannot be evaluated (unknown operator, operand of the wrong type) fails
/// closed to `false` and is logged at `warn` level.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r OperatorRegistry,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Self::new(OperatorRegistry::global())
    }
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self { registry }
    }

    /// Returns whether the edge guarded by `condition` fires for `output`.
    pub fn evaluate(&self, condition: &Condition, output: &Value) -> bool {
        self.decide(condition, output).fired
    }

    /// Evaluates `condition` and explains the result.
    pub fn decide(&self, condition: &Condition, output: &Value) -> Decision {
        let field = condition.field.trim();
        let operand = path::resolve(output, field);
        let operator_id = condition.operator.as_str();

        let operator = match self.registry.lookup(operator_id) {
            Ok(operator) => operator,
            Err(e) => {
                let error = EvaluationError::from(e);
                return self.indeterminate(
                    condition,
                    operand,
                    operator_id,
                    condition.value.as_ref(),
                    error,
                );
            }
        };

        let metadata = operator.metadata();
        let shown_value = if metadata.requires_value {
            condition.value.as_ref()
        } else {
            None
        };

        match operator.compare(operand, condition.value.as_ref()) {
            Ok(matched) => Decision {
                fired: matched,
                outcome: if matched {
                    Outcome::Matched
                } else {
                    Outcome::NotMatched
                },
                reason: TraceFormatter::format_decision(
                    field,
                    operand,
                    &metadata.symbol,
                    shown_value,
                    None,
                ),
            },
            Err(mismatch) => {
                let error = EvaluationError::TypeMismatch {
                    operator: operator_id.to_string(),
                    expected: mismatch.expected.to_string(),
                    found: mismatch.found,
                };
                self.indeterminate(condition, operand, &metadata.symbol, shown_value, error)
            }
        }
    }

    fn indeterminate(
        &self,
        condition: &Condition,
        operand: Resolved<'_>,
        symbol: &str,
        shown_value: Option<&Value>,
        error: EvaluationError,
    ) -> Decision {
        warn!(
            field = %condition.field,
            operator = %condition.operator,
            error = %error,
            "Condition could not be evaluated; edge will not fire"
        );
        let note = format!("indeterminate: {}", error);
        Decision {
            fired: false,
            reason: TraceFormatter::format_decision(
                condition.field.trim(),
                operand,
                symbol,
                shown_value,
                Some(&note),
            ),
            outcome: Outcome::Indeterminate(error),
        }
    }
}

/// Evaluates `condition` against `output` with the built-in operators.
///
/// ```
/// use bunki::condition::Condition;
/// use bunki::evaluator::evaluate;
/// use serde_json::json;
///
/// let condition = Condition::new("status", "eq", json!("done"));
/// assert!(evaluate(&condition, &json!({ "status": "done" })));
/// assert!(!evaluate(&condition, &json!({})));
/// ```
pub fn evaluate(condition: &Condition, output: &Value) -> bool {
    Evaluator::default().evaluate(condition, output)
}

/// Like [`evaluate`], but returns the full [`Decision`].
pub fn decide(condition: &Condition, output: &Value) -> Decision {
    Evaluator::default().decide(condition, output)
}
