//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, caller-facing failures. Every variant
/// maps to exactly one HTTP status at the API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input (e.g. absent product id).
    #[error("{0}")]
    InvalidArgument(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// A category already holds its maximum number of distinct items.
    #[error("category '{category}' is at capacity ({capacity} items)")]
    CapacityExceeded { category: String, capacity: usize },
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn capacity_exceeded(category: impl Into<String>, capacity: usize) -> Self {
        Self::CapacityExceeded {
            category: category.into(),
            capacity,
        }
    }
}
