//! Decision nodes of the lifepath graph.

mod tag;

pub use tag::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier of a node, stable across the whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Id of the well-known start node.
    pub const START: &'static str = "init";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The conventional start node id.
    pub fn start() -> Self {
        Self::new(Self::START)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One decision point: display text, gating rules, and effects.
///
/// Nodes are only built from validated records and are never mutated once
/// they sit in a [`ChoiceGraph`](crate::ChoiceGraph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Short text shown on the choice button.
    pub label: String,

    /// Long text shown once the node is the current one.
    pub description: String,

    /// All of these must be established for the node to be reachable.
    pub required_tags: HashSet<Tag>,

    /// Any one of these being established makes the node unreachable.
    pub forbidden_tags: HashSet<Tag>,

    /// Tags established when the node is chosen.
    pub granted_tags: HashSet<Tag>,

    /// Directly reachable nodes, in display order.
    pub successors: Vec<NodeId>,
}

impl Node {
    /// A node with no successors ends the path.
    pub fn is_terminal(&self) -> bool {
        self.successors.is_empty()
    }

    /// Check if choosing this node establishes a specific tag.
    pub fn grants(&self, tag: &Tag) -> bool {
        self.granted_tags.contains(tag)
    }
}
