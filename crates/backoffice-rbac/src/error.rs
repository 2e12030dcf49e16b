//! Error types for policy-resolution operations
//!
//! Invalid inputs are rejected before any state mutation, so a caller that
//! receives one of these errors can assume its override set is unchanged.

use thiserror::Error;

/// RBAC error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RbacError {
    /// The supplied permission id is not in the catalog (malformed
    /// module/action, or the wildcard token used as an override target).
    /// Retrying with the same input will fail again.
    #[error("Invalid permission id: {0}")]
    InvalidPermissionId(String),

    /// The supplied module id is not in the catalog.
    /// Retrying with the same input will fail again.
    #[error("Invalid module: {0}")]
    InvalidModule(String),
}

/// Result type for RBAC operations.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::InvalidPermissionId(_) => "INVALID_PERMISSION_ID",
            RbacError::InvalidModule(_) => "INVALID_MODULE",
        }
    }
}
