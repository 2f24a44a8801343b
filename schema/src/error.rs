//! Schema error types.

use nest_core::{LabelId, NodeId, PropertyKeyId};
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur during schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Caller misuse of the constraint builder. Never retried.
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    /// Schema operation attempted outside an open transaction.
    #[error("No transaction is active")]
    NotInTransaction,

    /// Two nodes carry equal present values for a property under a label.
    /// The constraint is never partially applied.
    #[error(
        "Duplicate value {value} for property {property} on label {label}: nodes {first} and {second}"
    )]
    DuplicateValue {
        label: LabelId,
        property: PropertyKeyId,
        value: String,
        first: NodeId,
        second: NodeId,
    },

    /// The label index cannot serve a consistent answer. Fatal to the
    /// in-flight operation; propagated, never retried.
    #[error("Label index unavailable: {message}")]
    IndexUnavailable { message: String },
}

impl SchemaError {
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    pub fn index_unavailable(message: impl Into<String>) -> Self {
        Self::IndexUnavailable {
            message: message.into(),
        }
    }
}

/// The single public failure type produced at the constraint-creator
/// boundary. Carries a rendered message derived from the internal failure;
/// callers never need to inspect internal error kinds.
#[derive(Debug, Error)]
#[error("Unable to create constraint: {message}")]
pub struct ConstraintViolation {
    message: String,
}

impl ConstraintViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The rendered user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SchemaError> for ConstraintViolation {
    fn from(e: SchemaError) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}
