//! Choice views - what the navigator offers at its current position.

use lifepath_rules::NodeId;
use serde::{Deserialize, Serialize};

/// A successor that is currently reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferedChoice {
    pub id: NodeId,
    /// Short text for the choice button.
    pub label: String,
}

/// Snapshot of the current position: the offered successors, in the order the
/// current node lists them, and the current node's long description.
///
/// The view owns its data, so nothing a caller does with it can reach back
/// into the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    description: String,
    choices: Vec<OfferedChoice>,
}

impl ChoiceView {
    pub(crate) fn new(description: String, choices: Vec<OfferedChoice>) -> Self {
        Self {
            description,
            choices,
        }
    }

    /// Long description of the current node.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Offered successors in display order.
    pub fn choices(&self) -> &[OfferedChoice] {
        &self.choices
    }

    /// Ids of the offered successors in display order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.choices.iter().map(|c| &c.id)
    }

    /// Check if `id` is among the offered successors.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.choices.iter().any(|c| &c.id == id)
    }

    /// Label of an offered successor.
    pub fn label_of(&self, id: &NodeId) -> Option<&str> {
        self.choices
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Nothing is offered. The caller decides whether this ends the session.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty()
    }

    /// Serialize the view for an embedding UI.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Format the view as plain text, one numbered choice per line.
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.description);
        out.push('\n');

        if self.choices.is_empty() {
            out.push_str("(no further choices)\n");
        }
        for (i, choice) in self.choices.iter().enumerate() {
            out.push_str(&format!("{}. {} [{}]\n", i + 1, choice.label, choice.id));
        }

        out
    }
}
