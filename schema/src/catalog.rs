//! The catalog of active uniqueness constraints.

use nest_core::{IndexValue, LabelId, NodeId, PropertyKeyId, Value};
use nest_graph::NodeStore;
use std::collections::HashSet;
use std::fmt;

/// A published uniqueness rule: no two nodes bearing `label` may have equal
/// present values for `property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintDefinition {
    pub label: LabelId,
    pub property: PropertyKeyId,
}

impl ConstraintDefinition {
    pub fn new(label: LabelId, property: PropertyKeyId) -> Self {
        Self { label, property }
    }
}

impl fmt::Display for ConstraintDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unique({}, {})", self.label, self.property)
    }
}

/// The set of currently active uniqueness constraints.
///
/// Registration is a single set insert: a definition is either absent or
/// fully active, with no observable half-installed state. Write-time
/// enforcement is driven by [`ConstraintCatalog::would_violate`], which the
/// write path consults before committing a property change on a labeled
/// node.
#[derive(Debug, Default)]
pub struct ConstraintCatalog {
    active: HashSet<ConstraintDefinition>,
}

impl ConstraintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a definition. Returns false if it was already active.
    pub fn register(&mut self, definition: ConstraintDefinition) -> bool {
        self.active.insert(definition)
    }

    /// Check whether a (label, property) constraint is active.
    pub fn is_active(&self, label: LabelId, property: PropertyKeyId) -> bool {
        self.active.contains(&ConstraintDefinition::new(label, property))
    }

    /// Active constraints whose label matches.
    pub fn constraints_on(&self, label: LabelId) -> impl Iterator<Item = ConstraintDefinition> + '_ {
        self.active.iter().copied().filter(move |c| c.label == label)
    }

    /// All active constraints.
    pub fn definitions(&self) -> impl Iterator<Item = ConstraintDefinition> + '_ {
        self.active.iter().copied()
    }

    /// Number of active constraints.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True if no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Check whether writing `candidate` for `property` on a node carrying
    /// `label` would violate an active constraint: true iff the constraint
    /// is active and some node other than `excluding` already holds an
    /// equal present value. Null candidates never collide.
    pub fn would_violate(
        &self,
        store: &NodeStore,
        label: LabelId,
        property: PropertyKeyId,
        candidate: &Value,
        excluding: NodeId,
    ) -> bool {
        if !self.is_active(label, property) {
            return false;
        }
        let candidate = match IndexValue::from_value(candidate) {
            Some(v) => v,
            None => return false,
        };

        store.nodes_with_label(label).any(|other| {
            other != excluding
                && store
                    .property(other, property)
                    .and_then(IndexValue::from_value)
                    .map(|v| v == candidate)
                    .unwrap_or(false)
        })
    }
}
