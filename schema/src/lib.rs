//! NEST Schema
//!
//! Uniqueness constraints over labeled nodes.
//!
//! Responsibilities:
//! - Hold the catalog of active (label, property) uniqueness constraints
//! - Drive the builder chain that requests a new constraint
//! - Install a constraint online: verify existing data, then publish
//! - Serve the write-path check for property changes on labeled nodes

mod catalog;
mod creator;
mod error;
mod installer;

pub use catalog::{ConstraintCatalog, ConstraintDefinition};
pub use creator::{ConstraintCreator, SchemaActions};
pub use error::{ConstraintViolation, SchemaError, SchemaResult};
pub use installer::ConstraintInstaller;
