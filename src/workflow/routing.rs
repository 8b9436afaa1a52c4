use super::document::{EdgeDefinition, WorkflowDocument};
use crate::evaluator::Evaluator;
use crate::operator::OperatorRegistry;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// The routing decision for one outgoing edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDecision {
    /// Index of the edge in the document's edge list.
    pub edge_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub fired: bool,
    pub reason: String,
}

/// Decides which outgoing edges of `node_id` fire for `output`, using the
/// built-in operators.
pub fn select_branches(document: &WorkflowDocument, node_id: &str, output: &Value) -> Vec<BranchDecision> {
    select_branches_with(OperatorRegistry::global(), document, node_id, output)
}

/// Evaluates every outgoing edge of `node_id` independently, in declaration
/// order. Several edges may fire; edges without a condition always fire.
pub fn select_branches_with(
    registry: &OperatorRegistry,
    document: &WorkflowDocument,
    node_id: &str,
    output: &Value,
) -> Vec<BranchDecision> {
    let evaluator = Evaluator::new(registry);

    document
        .edges
        .iter()
        .enumerate()
        .filter(|(_, edge)| edge.source == node_id)
        .map(|(edge_index, edge)| {
            let (fired, reason) = match &edge.annotation.condition {
                Some(condition) => {
                    let decision = evaluator.decide(condition, output);
                    (decision.fired, decision.reason)
                }
                None => (true, "unconditional".to_string()),
            };
            debug!(
                source = node_id,
                target = %edge.target,
                edge_index,
                fired,
                reason = %reason,
                "Branch decision"
            );
            decision_for(edge_index, edge, fired, reason)
        })
        .collect()
}

fn decision_for(edge_index: usize, edge: &EdgeDefinition, fired: bool, reason: String) -> BranchDecision {
    BranchDecision {
        edge_index,
        edge_id: edge.id.clone(),
        target: edge.target.clone(),
        label: edge.annotation.display_label(),
        fired,
        reason,
    }
}
