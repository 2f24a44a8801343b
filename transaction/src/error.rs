//! Transaction error types.

use nest_core::StoreError;
use nest_schema::ConstraintDefinition;
use thiserror::Error;

/// Transaction errors.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// No transaction is active.
    #[error("no transaction is active")]
    NoActiveTransaction,

    /// Transaction is already active.
    #[error("transaction already active")]
    AlreadyActive,

    /// A write was rejected because it would violate an active uniqueness
    /// constraint.
    #[error("uniqueness violation: {constraint} rejects value {value}")]
    UniquenessViolation {
        constraint: ConstraintDefinition,
        value: String,
    },

    /// Store error during transaction.
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
}

impl TransactionError {
    pub fn uniqueness_violation(
        constraint: ConstraintDefinition,
        value: impl Into<String>,
    ) -> Self {
        Self::UniquenessViolation {
            constraint,
            value: value.into(),
        }
    }
}

/// Result type for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;
