//! Integration test fixtures for NEST.
//!
//! The [`Fixture`] owns a node store and a constraint catalog and runs
//! closures inside transactions, so scenarios read as short transaction
//! scripts.

mod fixture;

pub use fixture::Fixture;

/// Common imports for integration scenarios.
pub mod prelude {
    pub use crate::Fixture;
    pub use nest_core::{props, LabelId, NodeId, PropertyKeyId, Value};
    pub use nest_graph::{LabelIndex, NodeStore};
    pub use nest_schema::{
        ConstraintCatalog, ConstraintCreator, ConstraintDefinition, ConstraintViolation,
        SchemaActions, SchemaError,
    };
    pub use nest_transaction::{TransactionError, TransactionManager};
}
