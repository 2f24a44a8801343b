//! Shared test fixture: a store and catalog with transaction helpers.

use nest_core::{LabelId, NodeId};
use nest_graph::NodeStore;
use nest_schema::ConstraintCatalog;
use nest_transaction::TransactionManager;
use std::collections::HashSet;

/// Owns the collaborators a scenario needs and runs closures inside
/// transactions.
#[derive(Default)]
pub struct Fixture {
    pub store: NodeStore,
    pub catalog: ConstraintCatalog,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure inside a transaction and commit it.
    pub fn commit<T>(&mut self, f: impl FnOnce(&mut TransactionManager<'_>) -> T) -> T {
        let mut manager = TransactionManager::new(&mut self.store, &mut self.catalog);
        manager.begin().unwrap();
        let out = f(&mut manager);
        manager.commit().unwrap();
        out
    }

    /// Run a closure inside a transaction and roll it back.
    pub fn roll_back<T>(&mut self, f: impl FnOnce(&mut TransactionManager<'_>) -> T) -> T {
        let mut manager = TransactionManager::new(&mut self.store, &mut self.catalog);
        manager.begin().unwrap();
        let out = f(&mut manager);
        manager.rollback().unwrap();
        out
    }

    /// The committed set of nodes carrying a label.
    pub fn nodes_with_label(&self, label: LabelId) -> HashSet<NodeId> {
        self.store.nodes_with_label(label).collect()
    }
}
