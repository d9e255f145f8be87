//! Path Navigator - walks the choice graph one decision at a time.
//!
//! The navigator keeps three pieces of state:
//! 1. **History**: the chosen node ids, start node first, never empty
//! 2. **Tags**: a ledger whose key set is the union of grants over the history
//! 3. **Offer**: the reachable successors of the current node
//!
//! The offer is recomputed before any state change is committed, so callers
//! never observe a position whose offered choices belong to another node.

pub mod gate;
mod ledger;

pub use gate::GateVerdict;
pub use ledger::*;

use std::sync::Arc;

use lifepath_rules::{ChoiceGraph, DataError, Node, NodeId, Result, Tag};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::choice::{ChoiceView, OfferedChoice};

/// Identifier of one navigation session, attached to log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a navigation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Node the walk starts from.
    pub start_id: NodeId,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            start_id: NodeId::start(),
        }
    }
}

impl NavigatorConfig {
    /// Parse a config from TOML; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, DataError> {
        Ok(toml::from_str(text)?)
    }

    /// Set the start node.
    pub fn with_start(mut self, start_id: impl Into<NodeId>) -> Self {
        self.start_id = start_id.into();
        self
    }
}

/// Stateful walker over a shared [`ChoiceGraph`].
///
/// One navigator serves one session and one caller. Unavailable choices and
/// rollbacks at the start node are silently ignored; errors only surface when
/// the graph data references a node that does not exist.
#[derive(Debug)]
pub struct PathNavigator {
    graph: Arc<ChoiceGraph>,
    session: SessionId,
    history: Vec<NodeId>,
    tags: TagLedger,
    offer: ChoiceView,
}

impl PathNavigator {
    /// Start a session at the `"init"` node.
    pub fn new(graph: Arc<ChoiceGraph>) -> Result<Self> {
        Self::with_config(graph, NavigatorConfig::default())
    }

    /// Start a session with the given configuration.
    ///
    /// Fails with `NodeNotFound` if the start node, or one of its successors,
    /// is missing from the graph.
    pub fn with_config(graph: Arc<ChoiceGraph>, config: NavigatorConfig) -> Result<Self> {
        let session = SessionId::new();
        let start = graph.node(&config.start_id)?;

        // Canonical data has the start node grant nothing; applying its grants
        // anyway keeps the ledger equal to the union over the whole history.
        let mut tags = TagLedger::new();
        tags.grant(&start.granted_tags);

        let offer = compute_offer(&graph, start, &tags, session)?;
        debug!(%session, start = %config.start_id, "navigation session started");

        Ok(Self {
            history: vec![config.start_id],
            graph,
            session,
            tags,
            offer,
        })
    }

    /// The currently offered successors and the current node's description.
    ///
    /// Pure read: repeated calls without an intervening `choose` or `rollback`
    /// return equal views.
    pub fn current_choice(&self) -> ChoiceView {
        self.offer.clone()
    }

    /// Advance to `id` if it is currently offered; otherwise leave the state
    /// untouched. Returns the view at the resulting position.
    pub fn choose(&mut self, id: &NodeId) -> Result<ChoiceView> {
        if !self.offer.contains(id) {
            debug!(session = %self.session, choice = %id, "ignoring choice not currently offered");
            return Ok(self.current_choice());
        }

        let node = self.graph.node(id)?;
        let mut tags = self.tags.clone();
        tags.grant(&node.granted_tags);
        let offer = compute_offer(&self.graph, node, &tags, self.session)?;

        self.history.push(id.clone());
        self.tags = tags;
        self.offer = offer;

        debug!(
            session = %self.session,
            node = %id,
            depth = self.history.len(),
            "choice made"
        );
        Ok(self.current_choice())
    }

    /// Undo the last choice. A no-op at the start node.
    pub fn rollback(&mut self) -> Result<ChoiceView> {
        if !self.can_rollback() {
            debug!(session = %self.session, "rollback ignored at start node");
            return Ok(self.current_choice());
        }

        let depth = self.history.len();
        let popped = self.graph.node(&self.history[depth - 1])?;
        let previous = self.graph.node(&self.history[depth - 2])?;

        let mut tags = self.tags.clone();
        tags.revoke(&popped.granted_tags);
        let offer = compute_offer(&self.graph, previous, &tags, self.session)?;

        let undone = self.history.pop();
        self.tags = tags;
        self.offer = offer;

        if let Some(undone) = undone {
            debug!(session = %self.session, node = %undone, "choice rolled back");
        }
        Ok(self.current_choice())
    }

    /// Whether there is a choice to undo.
    pub fn can_rollback(&self) -> bool {
        self.history.len() > 1
    }

    /// Chosen node ids, start node first.
    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    /// Id of the current node (the last history entry).
    pub fn current_id(&self) -> &NodeId {
        &self.history[self.history.len() - 1]
    }

    pub fn current_node(&self) -> Result<&Node> {
        self.graph.node(self.current_id())
    }

    /// Check if a tag is established on the current path.
    pub fn is_established(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Established tags, in no particular order.
    pub fn established_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// The full tag ledger, including grant counts.
    pub fn ledger(&self) -> &TagLedger {
        &self.tags
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// The graph this session walks.
    pub fn graph(&self) -> &Arc<ChoiceGraph> {
        &self.graph
    }
}

/// Reachable successors of `current` under `tags`, in successor order.
fn compute_offer(
    graph: &ChoiceGraph,
    current: &Node,
    tags: &TagLedger,
    session: SessionId,
) -> Result<ChoiceView> {
    let mut choices: Vec<OfferedChoice> = Vec::with_capacity(current.successors.len());

    for id in &current.successors {
        if choices.iter().any(|c| &c.id == id) {
            continue;
        }

        let successor = graph.node(id)?;
        match gate::evaluate(successor, tags) {
            GateVerdict::Open => choices.push(OfferedChoice {
                id: id.clone(),
                label: successor.label.clone(),
            }),
            verdict => trace!(%session, candidate = %id, ?verdict, "successor gated"),
        }
    }

    trace!(
        %session,
        node = %current.id,
        offered = choices.len(),
        "offer recomputed"
    );
    Ok(ChoiceView::new(current.description.clone(), choices))
}
