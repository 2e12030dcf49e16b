//! # Overrides
//!
//! Per-user allow/deny exceptions. An override is the highest-precedence
//! signal in resolution: it supersedes every role grant, including wildcard
//! roles.

use serde::{Deserialize, Serialize};

use crate::catalog::Permission;
use crate::modules::Module;

/// An explicit per-user allow/deny exception for one permission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionOverride {
    /// The permission being overridden.
    pub permission: Permission,
    /// `true` forces allow, `false` forces deny.
    pub is_allowed: bool,
}

/// A user's set of permission overrides.
///
/// Invariant: at most one override per permission. [`OverrideSet::set`]
/// replaces in place, so normal construction cannot violate it. Reads still
/// scan last-match so that a set built from an external store that violated
/// the invariant degrades to last-write-wins instead of erroring.
///
/// # Example
///
/// ```
/// use backoffice_rbac::{Action, Module, OverrideSet, Permission};
///
/// let mut overrides = OverrideSet::new();
/// let perm = Permission::new(Module::Products, Action::Edit);
///
/// overrides.set(perm, false);
/// assert_eq!(overrides.get(&perm), Some(false));
///
/// overrides.set(perm, true);
/// assert_eq!(overrides.get(&perm), Some(true));
/// assert_eq!(overrides.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideSet {
    /// Overrides in insertion order.
    entries: Vec<PermissionOverride>,
}

impl OverrideSet {
    /// Create a new empty override set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from a list of entries.
    ///
    /// Duplicate permissions collapse to the last entry, preserving the
    /// position of the first occurrence.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PermissionOverride>,
    {
        let mut set = Self::new();
        for entry in entries {
            set.set(entry.permission, entry.is_allowed);
        }
        set
    }

    /// Set an override, replacing any existing override for the same
    /// permission.
    pub fn set(&mut self, permission: Permission, is_allowed: bool) {
        match self.entries.iter().position(|e| e.permission == permission) {
            Some(idx) => self.entries[idx].is_allowed = is_allowed,
            None => self.entries.push(PermissionOverride {
                permission,
                is_allowed,
            }),
        }
    }

    /// Get the override value for a permission, if one exists.
    ///
    /// Scans last-match to defend against duplicate entries.
    pub fn get(&self, permission: &Permission) -> Option<bool> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.permission == *permission)
            .map(|e| e.is_allowed)
    }

    /// Remove the override for a permission.
    ///
    /// # Returns
    ///
    /// `true` if an override was present, `false` otherwise
    pub fn remove(&mut self, permission: &Permission) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.permission != *permission);
        self.entries.len() != before
    }

    /// Remove every override under a module.
    pub fn clear_module(&mut self, module: Module) {
        self.entries.retain(|e| e.permission.module != module);
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionOverride> {
        self.entries.iter()
    }

    /// Get the count of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
