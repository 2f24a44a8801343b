//! The undo buffer: an ordered log of inverse records.
//!
//! Every applied mutation appends the record that undoes it; rollback
//! replays the log in reverse, restoring the store and the label index
//! exactly as if the transaction had never run. Idempotent no-op mutations
//! append nothing.

use nest_core::{LabelId, Node, NodeId, PropertyKeyId, Value};

/// The inverse of one applied mutation.
#[derive(Debug, Clone)]
pub enum UndoRecord {
    /// A node was created; undo deletes it.
    NodeCreated { id: NodeId },
    /// A node was deleted; undo restores the full snapshot.
    NodeDeleted { node: Node },
    /// A label was attached; undo detaches it.
    LabelAdded { node: NodeId, label: LabelId },
    /// A label was detached; undo re-attaches it.
    LabelRemoved { node: NodeId, label: LabelId },
    /// A property was written; undo restores the previous value, or removes
    /// the key if there was none.
    PropertySet {
        node: NodeId,
        key: PropertyKeyId,
        previous: Option<Value>,
    },
    /// A property was removed; undo re-inserts the previous value.
    PropertyRemoved {
        node: NodeId,
        key: PropertyKeyId,
        previous: Value,
    },
}

/// Ordered log of uncommitted changes.
#[derive(Debug, Default)]
pub struct UndoBuffer {
    records: Vec<UndoRecord>,
}

impl UndoBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an inverse record.
    pub fn record(&mut self, record: UndoRecord) {
        self.records.push(record);
    }

    /// Take the log, leaving the buffer empty. Rollback consumes this in
    /// reverse order.
    pub fn take(&mut self) -> Vec<UndoRecord> {
        std::mem::take(&mut self.records)
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear the buffer (on commit).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
