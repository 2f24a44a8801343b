//! The node entity.
//!
//! A node carries a set of labels and a map of property values. Label
//! membership is true set semantics: adding a label twice or removing an
//! absent one leaves the node unchanged.

use crate::{LabelId, NodeId, Properties, PropertyKeyId, Value};
use std::collections::HashSet;

/// A node in the graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Labels currently attached to this node.
    pub labels: HashSet<LabelId>,
    /// Version number, incremented on every mutation.
    pub version: u64,
    /// Property values.
    pub properties: Properties,
}

impl Node {
    /// Create a new node with the given labels and properties.
    pub fn new(id: NodeId, labels: HashSet<LabelId>, properties: Properties) -> Self {
        Self {
            id,
            labels,
            version: 1,
            properties,
        }
    }

    /// Check whether this node carries a label.
    pub fn has_label(&self, label: LabelId) -> bool {
        self.labels.contains(&label)
    }

    /// Attach a label. Returns false if the label was already present.
    pub fn add_label(&mut self, label: LabelId) -> bool {
        let added = self.labels.insert(label);
        if added {
            self.version += 1;
        }
        added
    }

    /// Detach a label. Returns false if the label was not present.
    pub fn remove_label(&mut self, label: LabelId) -> bool {
        let removed = self.labels.remove(&label);
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Get a property value by key.
    pub fn property(&self, key: PropertyKeyId) -> Option<&Value> {
        self.properties.get(&key)
    }

    /// Set a property value, returning the previous value if any.
    pub fn set_property(&mut self, key: PropertyKeyId, value: Value) -> Option<Value> {
        self.version += 1;
        self.properties.insert(key, value)
    }

    /// Remove a property, returning the removed value if any.
    pub fn remove_property(&mut self, key: PropertyKeyId) -> Option<Value> {
        let result = self.properties.remove(&key);
        if result.is_some() {
            self.version += 1;
        }
        result
    }
}
