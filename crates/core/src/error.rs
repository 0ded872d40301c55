//! Domain error model.

use thiserror::Error;

use crate::collection::Collection;
use crate::id::RecordId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, local failures (validation, lookups,
/// uniqueness). Storage and transport concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more required fields were missing or invalid on submit.
    #[error("validation failed: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    /// A lookup or edit targeted an id that is not in the collection.
    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: RecordId },

    /// A unique key is already taken by another record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(fields: Vec<&'static str>) -> Self {
        Self::Validation { fields }
    }

    pub fn invalid_field(field: &'static str) -> Self {
        Self::Validation {
            fields: vec![field],
        }
    }

    pub fn not_found(collection: Collection, id: RecordId) -> Self {
        Self::NotFound { collection, id }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Offending field names when this is a validation failure.
    pub fn fields(&self) -> &[&'static str] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }
}
