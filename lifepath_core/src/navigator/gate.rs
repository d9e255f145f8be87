//! Reachability gate for candidate successors.
//!
//! A successor is reachable when none of its forbidden tags is established and
//! every one of its required tags is. Both checks are vacuously satisfied by
//! empty tag sets.

use lifepath_rules::{Node, Tag};

use super::TagLedger;

/// Outcome of evaluating a node's gate against the established tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Open,
    /// An established tag is in the node's forbidden set.
    Forbidden(Tag),
    /// A required tag is not established yet.
    MissingRequirement(Tag),
}

impl GateVerdict {
    pub fn is_open(&self) -> bool {
        matches!(self, GateVerdict::Open)
    }
}

/// Evaluate the gate of `node`.
pub fn evaluate(node: &Node, established: &TagLedger) -> GateVerdict {
    if let Some(tag) = node.forbidden_tags.iter().find(|t| established.contains(t)) {
        return GateVerdict::Forbidden(tag.clone());
    }

    // Subset check: every required tag must be present, not just one.
    if let Some(tag) = node.required_tags.iter().find(|t| !established.contains(t)) {
        return GateVerdict::MissingRequirement(tag.clone());
    }

    GateVerdict::Open
}

/// Check if `node` is reachable given the established tags.
pub fn is_reachable(node: &Node, established: &TagLedger) -> bool {
    evaluate(node, established).is_open()
}
