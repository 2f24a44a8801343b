//! Transaction manager over the node store and constraint catalog.

use nest_core::{LabelId, NodeId, Properties, PropertyKeyId, Value};
use nest_graph::NodeStore;
use nest_schema::{
    ConstraintCatalog, ConstraintDefinition, ConstraintInstaller, SchemaActions, SchemaError,
    SchemaResult,
};

use crate::buffer::{UndoBuffer, UndoRecord};
use crate::error::{TransactionError, TransactionResult};

/// Transaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// No transaction is active.
    Inactive,
    /// Transaction is active.
    Active,
    /// Transaction is being committed.
    Committing,
    /// Transaction is being rolled back.
    RollingBack,
}

/// Single-writer transaction manager.
///
/// Mutations apply directly to the store and append inverse records to the
/// undo buffer, giving read-your-own-writes within the transaction; no
/// other writer can exist while the manager holds the mutable borrows, so
/// uncommitted changes are never visible elsewhere. Rollback replays the
/// undo log in reverse, leaving store and label index exactly as before the
/// transaction began.
pub struct TransactionManager<'s> {
    store: &'s mut NodeStore,
    catalog: &'s mut ConstraintCatalog,
    state: TransactionState,
    buffer: UndoBuffer,
}

impl<'s> TransactionManager<'s> {
    /// Create a new transaction manager.
    pub fn new(store: &'s mut NodeStore, catalog: &'s mut ConstraintCatalog) -> Self {
        Self {
            store,
            catalog,
            state: TransactionState::Inactive,
            buffer: UndoBuffer::new(),
        }
    }

    /// Check if a transaction is active.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Get the current transaction state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    // ========== Transaction Lifecycle ==========

    /// Begin a new transaction.
    pub fn begin(&mut self) -> TransactionResult<()> {
        if self.state == TransactionState::Active {
            return Err(TransactionError::AlreadyActive);
        }

        self.buffer = UndoBuffer::new();
        self.state = TransactionState::Active;

        Ok(())
    }

    /// Commit the current transaction. Changes are already applied; the
    /// undo log is discarded.
    pub fn commit(&mut self) -> TransactionResult<()> {
        if self.state != TransactionState::Active {
            return Err(TransactionError::NoActiveTransaction);
        }

        self.state = TransactionState::Committing;
        self.buffer.clear();
        self.state = TransactionState::Inactive;

        Ok(())
    }

    /// Rollback the current transaction, undoing every applied mutation in
    /// reverse order.
    pub fn rollback(&mut self) -> TransactionResult<()> {
        if self.state != TransactionState::Active {
            return Err(TransactionError::NoActiveTransaction);
        }

        self.state = TransactionState::RollingBack;
        let result = self.apply_undo();
        self.state = TransactionState::Inactive;
        result
    }

    fn apply_undo(&mut self) -> TransactionResult<()> {
        for record in self.buffer.take().into_iter().rev() {
            match record {
                UndoRecord::NodeCreated { id } => {
                    self.store.delete_node(id)?;
                }
                UndoRecord::NodeDeleted { node } => {
                    self.store.restore_node(node)?;
                }
                UndoRecord::LabelAdded { node, label } => {
                    self.store.remove_label(node, label)?;
                }
                UndoRecord::LabelRemoved { node, label } => {
                    self.store.add_label(node, label)?;
                }
                UndoRecord::PropertySet {
                    node,
                    key,
                    previous,
                } => match previous {
                    Some(value) => {
                        self.store.set_property(node, key, value)?;
                    }
                    None => {
                        self.store.remove_property(node, key)?;
                    }
                },
                UndoRecord::PropertyRemoved {
                    node,
                    key,
                    previous,
                } => {
                    self.store.set_property(node, key, previous)?;
                }
            }
        }
        Ok(())
    }

    // ========== Operations ==========

    /// Create a node within the transaction. Rejected if any of its
    /// property values collides with an active uniqueness constraint.
    pub fn create_node<I>(&mut self, labels: I, properties: Properties) -> TransactionResult<NodeId>
    where
        I: IntoIterator<Item = LabelId>,
    {
        self.ensure_active()?;

        let id = self.store.create_node(labels, properties);

        if let Some((constraint, value)) = self.node_conflict(id) {
            self.store.delete_node(id)?;
            return Err(TransactionError::uniqueness_violation(constraint, value));
        }

        self.buffer.record(UndoRecord::NodeCreated { id });
        Ok(id)
    }

    /// Delete a node within the transaction.
    pub fn delete_node(&mut self, id: NodeId) -> TransactionResult<()> {
        self.ensure_active()?;

        let node = self.store.delete_node(id)?;
        self.buffer.record(UndoRecord::NodeDeleted { node });
        Ok(())
    }

    /// Attach a label to a node. Rejected if the node's current property
    /// values collide with an active constraint on that label. Returns
    /// false for an idempotent no-op.
    pub fn add_label(&mut self, id: NodeId, label: LabelId) -> TransactionResult<bool> {
        self.ensure_active()?;

        if let Some((constraint, value)) = self.label_conflict(id, label) {
            return Err(TransactionError::uniqueness_violation(constraint, value));
        }

        let added = self.store.add_label(id, label)?;
        if added {
            self.buffer.record(UndoRecord::LabelAdded { node: id, label });
        }
        Ok(added)
    }

    /// Detach a label from a node. Returns false for an idempotent no-op.
    pub fn remove_label(&mut self, id: NodeId, label: LabelId) -> TransactionResult<bool> {
        self.ensure_active()?;

        let removed = self.store.remove_label(id, label)?;
        if removed {
            self.buffer
                .record(UndoRecord::LabelRemoved { node: id, label });
        }
        Ok(removed)
    }

    /// Set a property on a node. Rejected if the value collides with an
    /// active constraint on any of the node's labels.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: PropertyKeyId,
        value: Value,
    ) -> TransactionResult<()> {
        self.ensure_active()?;

        if let Some((constraint, value)) = self.property_conflict(id, key, &value)? {
            return Err(TransactionError::uniqueness_violation(constraint, value));
        }

        let previous = self.store.set_property(id, key, value)?;
        self.buffer.record(UndoRecord::PropertySet {
            node: id,
            key,
            previous,
        });
        Ok(())
    }

    /// Remove a property from a node.
    pub fn remove_property(&mut self, id: NodeId, key: PropertyKeyId) -> TransactionResult<()> {
        self.ensure_active()?;

        if let Some(previous) = self.store.remove_property(id, key)? {
            self.buffer.record(UndoRecord::PropertyRemoved {
                node: id,
                key,
                previous,
            });
        }
        Ok(())
    }

    // ========== Reads (Read-Your-Writes) ==========

    /// Nodes currently carrying a label, including this transaction's own
    /// uncommitted changes.
    pub fn nodes_with_label(&self, label: LabelId) -> impl Iterator<Item = NodeId> + '_ {
        self.store.nodes_with_label(label)
    }

    /// Check if a node exists.
    pub fn node_exists(&self, id: NodeId) -> bool {
        self.store.contains(id)
    }

    /// Get a property value.
    pub fn property(&self, id: NodeId, key: PropertyKeyId) -> Option<Value> {
        self.store.property(id, key).cloned()
    }

    /// Labels currently carried by a node.
    pub fn labels_of(&self, id: NodeId) -> TransactionResult<Vec<LabelId>> {
        Ok(self.store.labels_of(id)?)
    }

    // ========== Internal Helpers ==========

    fn ensure_active(&self) -> TransactionResult<()> {
        if self.state != TransactionState::Active {
            return Err(TransactionError::NoActiveTransaction);
        }
        Ok(())
    }

    /// First active-constraint collision among a node's current labels and
    /// values, if any.
    fn node_conflict(&self, id: NodeId) -> Option<(ConstraintDefinition, String)> {
        let node = self.store.node(id)?;
        node.labels
            .iter()
            .find_map(|&label| self.label_conflict(node.id, label))
    }

    /// Collision that the node's current values would introduce under
    /// `label`'s active constraints.
    fn label_conflict(&self, id: NodeId, label: LabelId) -> Option<(ConstraintDefinition, String)> {
        for constraint in self.catalog.constraints_on(label) {
            if let Some(value) = self.store.property(id, constraint.property) {
                if self
                    .catalog
                    .would_violate(self.store, label, constraint.property, value, id)
                {
                    return Some((constraint, value.to_string()));
                }
            }
        }
        None
    }

    /// Collision that writing `value` for `key` on the node would
    /// introduce, across all of the node's labels.
    fn property_conflict(
        &self,
        id: NodeId,
        key: PropertyKeyId,
        value: &Value,
    ) -> TransactionResult<Option<(ConstraintDefinition, String)>> {
        for label in self.store.labels_of(id)? {
            if self.catalog.would_violate(self.store, label, key, value, id) {
                return Ok(Some((
                    ConstraintDefinition::new(label, key),
                    value.to_string(),
                )));
            }
        }
        Ok(None)
    }
}

impl SchemaActions for TransactionManager<'_> {
    fn in_transaction(&self) -> bool {
        self.is_active()
    }

    /// Verify-then-publish: the installation borrows the manager's store
    /// and catalog for its whole run, so the transaction holds the only
    /// write handle on the label from scan start to publication.
    fn create_uniqueness_constraint(
        &mut self,
        label: LabelId,
        property: PropertyKeyId,
    ) -> SchemaResult<ConstraintDefinition> {
        if !self.is_active() {
            return Err(SchemaError::NotInTransaction);
        }
        ConstraintInstaller::new(self.store, self.catalog).install(label, property)
    }
}
