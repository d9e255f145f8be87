//! Tag ledger - the established tags of a path, counted by granting node.

use std::collections::{HashMap, HashSet};

use lifepath_rules::Tag;

/// Established tags with, for each, the number of history entries granting it.
///
/// Undoing a step decrements counts instead of deleting tags outright, so a
/// tag granted by two nodes on the same path survives the rollback of one of
/// them. The key set is always the union of grants over the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLedger {
    counts: HashMap<Tag, usize>,
}

impl TagLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the grants of one node entering the history.
    pub fn grant<'a>(&mut self, tags: impl IntoIterator<Item = &'a Tag>) {
        for tag in tags {
            *self.counts.entry(tag.clone()).or_default() += 1;
        }
    }

    /// Undo the grants of one node leaving the history.
    pub fn revoke<'a>(&mut self, tags: impl IntoIterator<Item = &'a Tag>) {
        for tag in tags {
            if let Some(count) = self.counts.get_mut(tag) {
                *count -= 1;
                if *count == 0 {
                    self.counts.remove(tag);
                }
            }
        }
    }

    /// Check if a tag is currently established.
    pub fn contains(&self, tag: &Tag) -> bool {
        self.counts.contains_key(tag)
    }

    /// Number of history entries currently granting `tag`.
    pub fn grant_count(&self, tag: &Tag) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Iterate over established tags, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.counts.keys()
    }

    /// Get the number of distinct established tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Owned copy of the established tag set.
    pub fn to_set(&self) -> HashSet<Tag> {
        self.counts.keys().cloned().collect()
    }
}
