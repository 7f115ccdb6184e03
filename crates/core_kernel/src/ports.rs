//! Store ports
//!
//! Each domain defines its own port trait over its own row types; the
//! coordinator aggregates them into a unit of work. All port
//! implementations report failures through the unified `StoreError` so the
//! retry/no-retry decision is uniform across adapters.

use std::fmt;
use thiserror::Error;

/// Error type for store-port operations
///
/// A `StoreError` never carries domain meaning - domain rules fail with the
/// owning domain's error type before the store is touched. Store errors are
/// either transient (caller may retry the whole unit of work with the same
/// idempotency key) or permanent.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row was not found
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A uniqueness constraint rejected the write (e.g., a duplicate
    /// reference number under `(tenant, document_type, reference_no)`)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The operation timed out waiting for the store
    #[error("Timeout during {operation}")]
    Timeout { operation: String },

    /// An internal adapter error occurred
    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if retrying the unit of work may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection { .. } | StoreError::Timeout { .. }
        )
    }

    /// Returns true if a uniqueness constraint rejected the write
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this marker so implementations are thread-safe and
/// usable across await points.
pub trait DomainPort: Send + Sync + 'static {}
