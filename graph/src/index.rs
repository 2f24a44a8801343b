//! The label index: LabelId -> Set<NodeId>.
//!
//! Invariant: a NodeId appears under LabelId L iff, in the currently
//! visible state, the node exists and carries L. Every mutation of the
//! store re-establishes this invariant within the same call.
//!
//! All mutations are idempotent per (label, node) pair: inserting a present
//! pair or removing an absent one is a silent no-op, because the caller
//! re-derives whether the operation is needed from its own checked state.

use nest_core::{LabelId, NodeId};
use std::collections::{HashMap, HashSet};

/// Secondary index from label to the set of nodes currently carrying it.
#[derive(Debug, Default)]
pub struct LabelIndex {
    index: HashMap<LabelId, HashSet<NodeId>>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under every label in the batch.
    pub fn on_node_created<I>(&mut self, node_id: NodeId, labels: I)
    where
        I: IntoIterator<Item = LabelId>,
    {
        for label in labels {
            self.on_label_added(node_id, label);
        }
    }

    /// Insert a node under a label. Returns false if already present.
    pub fn on_label_added(&mut self, node_id: NodeId, label: LabelId) -> bool {
        self.index.entry(label).or_default().insert(node_id)
    }

    /// Remove a node from a label's entry. Returns false if absent.
    /// Entries that become empty are dropped from the map.
    pub fn on_label_removed(&mut self, node_id: NodeId, label: LabelId) -> bool {
        if let Some(set) = self.index.get_mut(&label) {
            let removed = set.remove(&node_id);
            if set.is_empty() {
                self.index.remove(&label);
            }
            removed
        } else {
            false
        }
    }

    /// Remove a node from every entry in the batch. The caller supplies the
    /// node's label set at time of deletion, since the node itself is gone.
    pub fn on_node_deleted<I>(&mut self, node_id: NodeId, labels: I)
    where
        I: IntoIterator<Item = LabelId>,
    {
        for label in labels {
            self.on_label_removed(node_id, label);
        }
    }

    /// Iterate the nodes currently carrying a label.
    pub fn nodes_with_label(&self, label: LabelId) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(&label)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Check whether a (label, node) pair is present.
    pub fn contains(&self, label: LabelId, node_id: NodeId) -> bool {
        self.index
            .get(&label)
            .map(|set| set.contains(&node_id))
            .unwrap_or(false)
    }

    /// Number of nodes carrying a label.
    pub fn len(&self, label: LabelId) -> usize {
        self.index.get(&label).map(|set| set.len()).unwrap_or(0)
    }

    /// True if no node carries the label.
    pub fn is_empty(&self, label: LabelId) -> bool {
        self.len(label) == 0
    }
}
