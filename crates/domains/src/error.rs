//! # AppError
//!
//! Centralized error handling for the Campus-Hub ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// Field-level validation failure, shown inline next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Persistence failures from a collection store.
///
/// No retries anywhere: storage is local and deterministic, so a retry
/// without changed input would reproduce the same error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying medium rejected the write for lack of space.
    #[error("storage quota exceeded writing slot '{0}'")]
    QuotaExceeded(String),

    /// The collection could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other I/O failure from the storage medium.
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// The primary error type for all domain operations.
///
/// Every variant degrades to "this one action did not complete" — nothing
/// here is fatal to the embedding process.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Complaint, Registration, Event)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, Uuid),

    /// One or more fields failed validation; submission is blocked.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// A status transition outside the entity's workflow graph.
    /// Should be unreachable given UI gating; the transition is not applied.
    #[error("illegal transition from '{from}' to '{to}'")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },

    /// The acting user may not perform this operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The operation contradicts current state (e.g., event at capacity).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure; the attempted change was not applied.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// The validation failures carried by this error, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// A specialized Result type for Campus-Hub logic.
pub type Result<T> = std::result::Result<T, AppError>;
