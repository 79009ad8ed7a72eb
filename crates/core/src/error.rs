//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// schema integrity, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, off-schema path).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A tenant schema is internally inconsistent (duplicate field name,
    /// sub-structure not matching the declared field type).
    #[error("schema integrity violated: {0}")]
    SchemaIntegrity(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate create).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A tenant feature was queried before being configured (e.g. asking for
    /// recommendations when no eligibility criteria exist). Distinct from an
    /// empty result set on purpose.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn schema_integrity(msg: impl Into<String>) -> Self {
        Self::SchemaIntegrity(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
