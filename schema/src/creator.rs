//! The constraint-creator builder chain.
//!
//! A request for a uniqueness constraint is accumulated step by step:
//! `for_label(L).on(P).unique()?.create(&mut txn)?`. Each step consumes the
//! builder and returns a new value; no step mutates another. The terminal
//! `create` runs against a [`SchemaActions`] handle — there is no ambient
//! transaction state anywhere in this crate.

use crate::catalog::ConstraintDefinition;
use crate::error::{ConstraintViolation, SchemaError, SchemaResult};
use nest_core::{LabelId, PropertyKeyId};

/// The seam between the builder and the transaction layer. The transaction
/// manager implements this; tests can exercise the builder against a stub.
pub trait SchemaActions {
    /// Whether an open transaction backs this handle.
    fn in_transaction(&self) -> bool;

    /// Verify existing data and publish a (label, property) uniqueness
    /// constraint.
    fn create_uniqueness_constraint(
        &mut self,
        label: LabelId,
        property: PropertyKeyId,
    ) -> SchemaResult<ConstraintDefinition>;
}

/// Builder state machine for a uniqueness-constraint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintCreator {
    /// A label has been chosen; no property key yet.
    Draft { label: LabelId },
    /// A property key has been chosen; `unique` marks the terminal mode.
    WithProperty {
        label: LabelId,
        property: PropertyKeyId,
        unique: bool,
    },
}

impl ConstraintCreator {
    /// Start a constraint request for a label.
    pub fn for_label(label: LabelId) -> Self {
        Self::Draft { label }
    }

    /// Choose the property key. On a builder that already has one, this
    /// re-bases onto the new key, keeping the mode: constraints are
    /// single-property, so changing the key is a re-target, not an
    /// accumulation.
    pub fn on(self, property: PropertyKeyId) -> Self {
        match self {
            Self::Draft { label } => Self::WithProperty {
                label,
                property,
                unique: false,
            },
            Self::WithProperty { label, unique, .. } => Self::WithProperty {
                label,
                property,
                unique,
            },
        }
    }

    /// Mark the request as a uniqueness constraint. Calling this on an
    /// already-unique builder signals a caller logic bug and fails rather
    /// than silently succeeding.
    pub fn unique(self) -> SchemaResult<Self> {
        match self {
            Self::Draft { .. } => Err(SchemaError::invalid_operation(
                "no property key specified for uniqueness constraint",
            )),
            Self::WithProperty { unique: true, .. } => {
                Err(SchemaError::invalid_operation("already unique"))
            }
            Self::WithProperty {
                label, property, ..
            } => Ok(Self::WithProperty {
                label,
                property,
                unique: true,
            }),
        }
    }

    /// Install the accumulated request. Requires an open transaction on the
    /// handle and a terminal uniqueness mode; every internal failure is
    /// translated into a single user-facing [`ConstraintViolation`].
    pub fn create<A: SchemaActions>(
        self,
        actions: &mut A,
    ) -> Result<ConstraintDefinition, ConstraintViolation> {
        self.do_create(actions).map_err(ConstraintViolation::from)
    }

    fn do_create<A: SchemaActions>(self, actions: &mut A) -> SchemaResult<ConstraintDefinition> {
        let (label, property) = match self {
            Self::WithProperty {
                label,
                property,
                unique: true,
            } => (label, property),
            _ => {
                return Err(SchemaError::invalid_operation(
                    "no constraint type specified",
                ))
            }
        };

        if !actions.in_transaction() {
            return Err(SchemaError::NotInTransaction);
        }

        actions.create_uniqueness_constraint(label, property)
    }
}
