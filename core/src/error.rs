//! Common error types for NEST.

use crate::NodeId;
use thiserror::Error;

/// Errors that can occur during node store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Invalid operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for node store operations.
pub type StoreResult<T> = Result<T, StoreError>;
