//! Online installation of uniqueness constraints.
//!
//! Verify-then-publish: the existing data under the target label is scanned
//! for duplicate property values, and only a clean scan publishes the
//! definition into the catalog. The installer borrows the store and the
//! catalog for its whole run, so no write to the label can interleave
//! between verification and publication.

use crate::catalog::{ConstraintCatalog, ConstraintDefinition};
use crate::error::{SchemaError, SchemaResult};
use nest_core::{IndexValue, LabelId, NodeId, PropertyKeyId};
use nest_graph::NodeStore;
use std::collections::HashMap;

/// Installs a uniqueness constraint against live data.
pub struct ConstraintInstaller<'s, 'c> {
    store: &'s NodeStore,
    catalog: &'c mut ConstraintCatalog,
}

impl<'s, 'c> ConstraintInstaller<'s, 'c> {
    pub fn new(store: &'s NodeStore, catalog: &'c mut ConstraintCatalog) -> Self {
        Self { store, catalog }
    }

    /// Scan the nodes carrying `label` for duplicate present values of
    /// `property`; publish the constraint only if none are found.
    ///
    /// Absent and null values are skipped: only equal present values
    /// collide. The first collision aborts the installation and names both
    /// nodes and the offending value.
    pub fn install(
        self,
        label: LabelId,
        property: PropertyKeyId,
    ) -> SchemaResult<ConstraintDefinition> {
        let definition = ConstraintDefinition::new(label, property);
        if self.catalog.is_active(label, property) {
            return Err(SchemaError::invalid_operation(format!(
                "constraint already exists: {}",
                definition
            )));
        }

        let mut seen: HashMap<IndexValue, NodeId> = HashMap::new();
        for node_id in self.store.nodes_with_label(label) {
            let node = self.store.node(node_id).ok_or_else(|| {
                SchemaError::index_unavailable(format!(
                    "label index references missing node {}",
                    node_id
                ))
            })?;

            let value = match node.property(property) {
                Some(v) => v,
                None => continue,
            };
            let key = match IndexValue::from_value(value) {
                Some(k) => k,
                None => continue,
            };

            if let Some(&first) = seen.get(&key) {
                return Err(SchemaError::DuplicateValue {
                    label,
                    property,
                    value: value.to_string(),
                    first,
                    second: node_id,
                });
            }
            seen.insert(key, node_id);
        }

        self.catalog.register(definition);
        Ok(definition)
    }
}
