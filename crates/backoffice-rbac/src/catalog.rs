//! # Permission Catalog
//!
//! Core permission types for the RBAC system. A permission combines a module
//! with an action; the catalog is the fixed cross product of the two sets,
//! and is the single source of validity for permission ids.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::actions::Action;
use crate::modules::Module;

/// Reserved wildcard token.
///
/// `"*"` marks a role as granting every catalog permission. It is never a
/// valid permission id on its own and never a valid override target.
pub const WILDCARD: &str = "*";

/// A permission is a combination of module and action.
///
/// The wire format is `"<module>.<action>"`, e.g. `"products.edit"`.
/// Both segments are case-sensitive and drawn from the fixed catalog sets;
/// serde uses the wire format directly.
///
/// # Example
///
/// ```
/// use backoffice_rbac::{Action, Module, Permission};
///
/// let perm = Permission::new(Module::Products, Action::Edit);
/// assert_eq!(perm.id(), "products.edit");
/// assert_eq!(Permission::parse("products.edit"), Some(perm));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    /// The module this permission applies to.
    pub module: Module,
    /// The action allowed within the module.
    pub action: Action,
}

impl Permission {
    /// Create a new permission.
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }

    /// Get the canonical permission id (e.g. `"orders.view"`).
    pub fn id(&self) -> String {
        format!("{}.{}", self.module.as_str(), self.action.as_str())
    }

    /// Parse a permission from its wire representation.
    ///
    /// Returns `None` for anything outside the catalog, including the
    /// reserved wildcard token.
    ///
    /// # Example
    ///
    /// ```
    /// use backoffice_rbac::{Action, Module, Permission};
    ///
    /// let perm = Permission::parse("orders.approve").unwrap();
    /// assert_eq!(perm.module, Module::Orders);
    /// assert_eq!(perm.action, Action::Approve);
    ///
    /// assert_eq!(Permission::parse("orders"), None);
    /// assert_eq!(Permission::parse("orders.fly"), None);
    /// assert_eq!(Permission::parse("*"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (module, action) = s.split_once('.')?;
        Some(Self {
            module: Module::parse(module)?,
            action: Action::parse(action)?,
        })
    }

    /// Get every permission in the catalog.
    ///
    /// The order is stable: modules in declaration order, actions nested in
    /// declaration order. With 10 modules and 6 actions the catalog holds
    /// exactly 60 permissions.
    pub fn all() -> Vec<Self> {
        let mut perms = Vec::with_capacity(Module::all().len() * Action::all().len());
        for module in Module::all() {
            for action in Action::all() {
                perms.push(Self { module, action });
            }
        }
        perms
    }

    /// Get the catalog restricted to one module, in action declaration order.
    pub fn for_module(module: Module) -> Vec<Self> {
        Action::all()
            .into_iter()
            .map(|action| Self { module, action })
            .collect()
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module.as_str(), self.action.as_str())
    }
}

impl Serialize for Permission {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Permission::parse(&id)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid permission id: {id}")))
    }
}

/// Check whether a string is a valid permission id.
///
/// True iff the id splits into a known module and a known action, or the id
/// is the wildcard token (valid only in role grants, never as an override
/// target).
///
/// # Example
///
/// ```
/// use backoffice_rbac::is_valid_permission_id;
///
/// assert!(is_valid_permission_id("users.view"));
/// assert!(is_valid_permission_id("*"));
/// assert!(!is_valid_permission_id("users.manage"));
/// assert!(!is_valid_permission_id("users"));
/// ```
pub fn is_valid_permission_id(id: &str) -> bool {
    id == WILDCARD || Permission::parse(id).is_some()
}

/// A set of permissions, as granted by a role.
///
/// Serializes as a catalog-ordered list of permission ids, so two sets with
/// the same content always have the same wire form (audit snapshots diff by
/// value).
///
/// # Example
///
/// ```
/// use backoffice_rbac::{Action, Module, Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.add(Permission::new(Module::Products, Action::View));
/// set.add(Permission::new(Module::Products, Action::Edit));
///
/// assert!(set.has(&Permission::new(Module::Products, Action::View)));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    /// The permissions in this set.
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Add a permission to the set.
    pub fn add(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    /// Remove a permission from the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was present, `false` otherwise
    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.permissions.remove(permission)
    }

    /// Check if the set contains a permission.
    pub fn has(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Create from a list of permission ids, rejecting anything outside the
    /// catalog.
    ///
    /// The wildcard token is not a permission id; wildcard grants are
    /// expressed on the role, not inside its permission set.
    ///
    /// # Example
    ///
    /// ```
    /// use backoffice_rbac::PermissionSet;
    ///
    /// let set = PermissionSet::from_ids(&["products.view", "products.edit"]).unwrap();
    /// assert_eq!(set.len(), 2);
    ///
    /// assert!(PermissionSet::from_ids(&["products.fly"]).is_err());
    /// ```
    pub fn from_ids(ids: &[&str]) -> Result<Self, crate::error::RbacError> {
        let mut set = Self::new();
        for id in ids {
            let perm = Permission::parse(id)
                .ok_or_else(|| crate::error::RbacError::InvalidPermissionId(id.to_string()))?;
            set.add(perm);
        }
        Ok(set)
    }

    /// Get all permissions in the set, in catalog order.
    pub fn all(&self) -> Vec<Permission> {
        Permission::all()
            .into_iter()
            .filter(|p| self.permissions.contains(p))
            .collect()
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        for perm in &other.permissions {
            self.permissions.insert(*perm);
        }
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        for perm in iter {
            set.add(perm);
        }
        set
    }
}

impl Serialize for PermissionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.all())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Vec::<Permission>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}
