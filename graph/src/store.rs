//! The node store: entity lifecycle, label sets, and property values.
//!
//! Every mutation keeps the label index synchronized within the same call,
//! so a lookup issued immediately after a mutation observes the new state.

use crate::index::LabelIndex;
use nest_core::{LabelId, Node, NodeId, Properties, PropertyKeyId, StoreError, StoreResult, Value};
use std::collections::{HashMap, HashSet};

/// Dense identifier allocator for nodes.
#[derive(Debug)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

/// In-memory node storage with an incrementally maintained label index.
#[derive(Debug)]
pub struct NodeStore {
    /// Node storage
    nodes: HashMap<NodeId, Node>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Label index
    label_index: LabelIndex,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            id_alloc: IdAllocator::new(),
            label_index: LabelIndex::new(),
        }
    }

    // ==================== Node Lifecycle ====================

    /// Create a new node with the given labels and properties.
    pub fn create_node<I>(&mut self, labels: I, properties: Properties) -> NodeId
    where
        I: IntoIterator<Item = LabelId>,
    {
        let id = self.id_alloc.alloc_node_id();
        let labels: HashSet<LabelId> = labels.into_iter().collect();

        self.label_index.on_node_created(id, labels.iter().copied());
        self.nodes.insert(id, Node::new(id, labels, properties));
        id
    }

    /// Delete a node, removing every index entry for its labels first.
    /// Returns the removed node so the caller can restore it on rollback.
    pub fn delete_node(&mut self, id: NodeId) -> StoreResult<Node> {
        let node = self.nodes.remove(&id).ok_or(StoreError::NodeNotFound(id))?;
        self.label_index
            .on_node_deleted(id, node.labels.iter().copied());
        Ok(node)
    }

    /// Re-insert a previously deleted node (rollback path). The node's
    /// identifier must not be present in the store.
    pub fn restore_node(&mut self, node: Node) -> StoreResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(StoreError::InvalidOperation(format!(
                "cannot restore {}: already present",
                node.id
            )));
        }
        self.label_index
            .on_node_created(node.id, node.labels.iter().copied());
        self.nodes.insert(node.id, node);
        Ok(())
    }

    // ==================== Label Operations ====================

    /// Attach a label to a node. Returns false if the node already carried it.
    pub fn add_label(&mut self, id: NodeId, label: LabelId) -> StoreResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;
        let added = node.add_label(label);
        if added {
            self.label_index.on_label_added(id, label);
        }
        Ok(added)
    }

    /// Detach a label from a node. Returns false if the node did not carry it.
    pub fn remove_label(&mut self, id: NodeId, label: LabelId) -> StoreResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;
        let removed = node.remove_label(label);
        if removed {
            self.label_index.on_label_removed(id, label);
        }
        Ok(removed)
    }

    // ==================== Property Operations ====================

    /// Set a property on a node, returning the previous value if any.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: PropertyKeyId,
        value: Value,
    ) -> StoreResult<Option<Value>> {
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;
        Ok(node.set_property(key, value))
    }

    /// Remove a property from a node, returning the removed value if any.
    pub fn remove_property(
        &mut self,
        id: NodeId,
        key: PropertyKeyId,
    ) -> StoreResult<Option<Value>> {
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;
        Ok(node.remove_property(key))
    }

    /// Read a property value.
    pub fn property(&self, id: NodeId, key: PropertyKeyId) -> Option<&Value> {
        self.nodes.get(&id).and_then(|n| n.property(key))
    }

    // ==================== Lookups ====================

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Labels currently carried by a node.
    pub fn labels_of(&self, id: NodeId) -> StoreResult<Vec<LabelId>> {
        let node = self.nodes.get(&id).ok_or(StoreError::NodeNotFound(id))?;
        Ok(node.labels.iter().copied().collect())
    }

    /// Iterate the nodes currently carrying a label.
    pub fn nodes_with_label(&self, label: LabelId) -> impl Iterator<Item = NodeId> + '_ {
        self.label_index.nodes_with_label(label)
    }

    /// Iterate all node identifiers in the store.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// The label index itself, for scan-based consumers.
    pub fn label_index(&self) -> &LabelIndex {
        &self.label_index
    }

    /// Number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
