//! Choice Graph - the immutable, fully loaded graph of decision nodes.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{DataError, GraphError, Node, NodeId, NodeRecord, RecordSet, Result};

/// The complete lifepath graph.
///
/// Built once from node records and read-only afterwards, so one graph can be
/// shared (typically behind an `Arc`) by any number of navigation sessions.
/// Successor references and connectivity are not validated; that is left to
/// the authored data.
#[derive(Debug, Clone, Default)]
pub struct ChoiceGraph {
    nodes: HashMap<NodeId, Node>,
}

impl ChoiceGraph {
    /// Build the graph from a collection of records.
    ///
    /// Fails on the first record missing a required field or reusing an id.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        let mut nodes = HashMap::new();

        for (index, record) in records.into_iter().enumerate() {
            let node = record.into_node(index)?;
            if nodes.contains_key(&node.id) {
                return Err(DataError::DuplicateId(node.id).into());
            }
            debug!(node = %node.id, successors = node.successors.len(), "loaded node");
            nodes.insert(node.id.clone(), node);
        }

        info!(nodes = nodes.len(), "choice graph built");
        Ok(Self { nodes })
    }

    /// Build the graph from an aggregated set of record groups.
    pub fn from_record_set(set: RecordSet) -> Result<Self> {
        Self::from_records(set)
    }

    /// Get the node for `id`.
    ///
    /// `NodeNotFound` here means the data references a node that does not
    /// exist; it never results from ids the navigator itself offered.
    pub fn node(&self, id: &NodeId) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Check if a node with this id exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
