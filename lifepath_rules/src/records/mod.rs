//! Node records - the authored input shape consumed by graph construction.
//!
//! Records arrive in groups (one per data file, e.g. common, noble, alien,
//! guild, priest) and are aggregated into a [`RecordSet`] before the graph is
//! built. Both the canonical field names and the legacy lifepath data names
//! are accepted:
//!
//! | canonical         | legacy        |
//! |-------------------|---------------|
//! | `id`              | `id`          |
//! | `shortLabel`      | `lbl`         |
//! | `longDescription` | `desc`        |
//! | `requiredTags`    | `obligatoire` |
//! | `forbiddenTags`   | `interdit`    |
//! | `grantedTags`     | `def`         |
//! | `successorIds`    | `next`        |

use serde::{Deserialize, Serialize};

use crate::{DataError, Node, NodeId, Tag};

/// One node as authored, before validation.
///
/// Every field is optional on the wire so that a missing one is reported as
/// [`DataError::MissingField`] rather than as an opaque parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: Option<String>,

    #[serde(alias = "lbl")]
    pub short_label: Option<String>,

    #[serde(alias = "desc")]
    pub long_description: Option<String>,

    #[serde(alias = "obligatoire")]
    pub required_tags: Option<Vec<String>>,

    #[serde(alias = "interdit")]
    pub forbidden_tags: Option<Vec<String>>,

    #[serde(alias = "def")]
    pub granted_tags: Option<Vec<String>>,

    /// Order is significant: it is the display order of offered choices.
    #[serde(alias = "next")]
    pub successor_ids: Option<Vec<String>>,
}

impl NodeRecord {
    /// Create a complete record with empty tag and successor lists.
    pub fn new(
        id: impl Into<String>,
        short_label: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            short_label: Some(short_label.into()),
            long_description: Some(long_description.into()),
            required_tags: Some(Vec::new()),
            forbidden_tags: Some(Vec::new()),
            granted_tags: Some(Vec::new()),
            successor_ids: Some(Vec::new()),
        }
    }

    /// Add a tag that must be established before this node is reachable.
    pub fn with_required(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Add a tag whose presence makes this node unreachable.
    pub fn with_forbidden(mut self, tag: impl Into<String>) -> Self {
        self.forbidden_tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Add a tag granted when this node is chosen.
    pub fn with_grant(mut self, tag: impl Into<String>) -> Self {
        self.granted_tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Append a successor; successors are offered in insertion order.
    pub fn with_successor(mut self, id: impl Into<String>) -> Self {
        self.successor_ids.get_or_insert_with(Vec::new).push(id.into());
        self
    }

    /// Validate the record into a [`Node`].
    ///
    /// `index` is the record's position in its collection and is only used for
    /// error reporting.
    pub fn into_node(self, index: usize) -> Result<Node, DataError> {
        let missing = |field| DataError::MissingField { index, field };

        let id = self.id.ok_or_else(|| missing("id"))?;
        let label = self.short_label.ok_or_else(|| missing("shortLabel"))?;
        let description = self
            .long_description
            .ok_or_else(|| missing("longDescription"))?;
        let required = self.required_tags.ok_or_else(|| missing("requiredTags"))?;
        let forbidden = self
            .forbidden_tags
            .ok_or_else(|| missing("forbiddenTags"))?;
        let granted = self.granted_tags.ok_or_else(|| missing("grantedTags"))?;
        let successors = self.successor_ids.ok_or_else(|| missing("successorIds"))?;

        Ok(Node {
            id: NodeId::from(id),
            label,
            description,
            required_tags: required.into_iter().map(Tag::from).collect(),
            forbidden_tags: forbidden.into_iter().map(Tag::from).collect(),
            granted_tags: granted.into_iter().map(Tag::from).collect(),
            successors: successors.into_iter().map(NodeId::from).collect(),
        })
    }
}

/// One authored data group: `{ "nodes": [ ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordGroup {
    pub nodes: Vec<NodeRecord>,
}

impl RecordGroup {
    /// Parse a group from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a group from TOML text (`[[nodes]]` tables).
    pub fn from_toml_str(text: &str) -> Result<Self, DataError> {
        Ok(toml::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Ordered aggregation of several record groups into one collection.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<NodeRecord>,
}

impl RecordSet {
    /// Create a new empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append all records of a group, keeping their order.
    pub fn push_group(&mut self, group: RecordGroup) {
        self.records.extend(group.nodes);
    }

    /// Builder form of [`push_group`](Self::push_group).
    pub fn with_group(mut self, group: RecordGroup) -> Self {
        self.push_group(group);
        self
    }

    /// Append a single record.
    pub fn push(&mut self, record: NodeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<RecordGroup> for RecordSet {
    fn from_iter<I: IntoIterator<Item = RecordGroup>>(groups: I) -> Self {
        let mut set = RecordSet::new();
        for group in groups {
            set.push_group(group);
        }
        set
    }
}

impl IntoIterator for RecordSet {
    type Item = NodeRecord;
    type IntoIter = std::vec::IntoIter<NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
