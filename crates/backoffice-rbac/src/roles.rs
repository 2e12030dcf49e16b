//! # Roles
//!
//! Role records and the id-keyed registry the resolver reads from. Role
//! lifecycle (create/edit/deactivate) is owned by an external role-management
//! collaborator; this module holds the records by value and answers grant
//! queries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{Permission, PermissionSet};

/// A named set of permission grants.
///
/// A wildcard role grants every catalog permission regardless of its
/// `permissions` set. An inactive role contributes nothing to resolution.
///
/// # Example
///
/// ```
/// use backoffice_rbac::{Action, Module, Permission, PermissionSet, Role};
///
/// let editors = Role::new("role-editor", "Editor")
///     .with_permissions(PermissionSet::from_ids(&["products.view", "products.edit"]).unwrap());
/// assert!(editors.grants(&Permission::new(Module::Products, Action::Edit)));
/// assert!(!editors.grants(&Permission::new(Module::Products, Action::Delete)));
///
/// let admins = Role::wildcard("role-admin", "Administrator");
/// assert!(admins.grants(&Permission::new(Module::Settings, Action::Delete)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Role id, referenced from user access contexts.
    pub id: String,

    /// Human-readable role name.
    pub name: String,

    /// Explicit permission grants. Ignored when `is_wildcard` is set.
    #[serde(default)]
    pub permissions: PermissionSet,

    /// Whether this role grants every catalog permission.
    #[serde(default)]
    pub is_wildcard: bool,

    /// Whether this role currently contributes to resolution.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Role {
    /// Create a new active role with no grants.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: PermissionSet::new(),
            is_wildcard: false,
            is_active: true,
        }
    }

    /// Create a wildcard role granting every catalog permission.
    pub fn wildcard(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_wildcard: true,
            ..Self::new(id, name)
        }
    }

    /// Set the explicit permission grants.
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }

    /// Check whether this role grants a permission.
    ///
    /// Does not consider `is_active`; lifecycle filtering happens during
    /// resolution.
    pub fn grants(&self, permission: &Permission) -> bool {
        self.is_wildcard || self.permissions.has(permission)
    }
}

/// Id-keyed view of the role records the resolver reads from.
///
/// The registry never fails a resolution on a stale reference: unknown role
/// ids are ignored with a warning (availability over strictness).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    /// Roles by id.
    roles: HashMap<String, Role>,
}

impl RoleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Insert or replace a role record.
    pub fn insert(&mut self, role: Role) {
        self.roles.insert(role.id.clone(), role);
    }

    /// Remove a role record.
    ///
    /// # Returns
    ///
    /// The removed role, if it existed
    pub fn remove(&mut self, role_id: &str) -> Option<Role> {
        self.roles.remove(role_id)
    }

    /// Look up a role by id.
    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Materialize the roles behind a list of role ids.
    ///
    /// Unknown ids are skipped with a `tracing` warning rather than failing
    /// the lookup: a stale reference must not take resolution down with it.
    pub fn roles_for(&self, role_ids: &[String]) -> Vec<&Role> {
        role_ids
            .iter()
            .filter_map(|id| {
                let role = self.roles.get(id);
                if role.is_none() {
                    tracing::warn!(role_id = %id, "unknown role reference ignored during resolution");
                }
                role
            })
            .collect()
    }

    /// Get the count of registered roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
