//! User access context
//!
//! The caller-owned state a resolution call operates on: which roles a user
//! holds and which per-user overrides apply. The core never keeps ambient
//! per-user state; every call receives one of these explicitly.

use serde::{Deserialize, Serialize};

use crate::overrides::OverrideSet;

/// A user's access inputs, supplied by the caller for each resolution call.
///
/// # Example
///
/// ```
/// use backoffice_rbac::UserAccessContext;
///
/// let ctx = UserAccessContext::new("user-17")
///     .with_role("role-editor")
///     .with_role("role-support");
/// assert_eq!(ctx.role_ids.len(), 2);
/// assert!(ctx.overrides.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccessContext {
    /// The user this context belongs to.
    pub user_id: String,

    /// Roles held, in assignment order. Duplicates are harmless (role
    /// contribution is idempotent).
    #[serde(default)]
    pub role_ids: Vec<String>,

    /// Per-user allow/deny exceptions.
    #[serde(default)]
    pub overrides: OverrideSet,
}

impl UserAccessContext {
    /// Create a context with no roles and no overrides.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role_ids: Vec::new(),
            overrides: OverrideSet::new(),
        }
    }

    /// Add a role reference.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_ids.push(role_id.into());
        self
    }

    /// Set the override set.
    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }
}
