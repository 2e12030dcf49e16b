//! # Policy Resolver
//!
//! Computes a user's effective permission matrix from roles and overrides,
//! and implements the two override-writing mutations (single-permission
//! toggle, whole-module toggle).
//!
//! Precedence is deterministic: an override wins unconditionally (including
//! over wildcard roles); otherwise the value is inherited from the roles;
//! otherwise access is denied. The result is total over the catalog and
//! independent of role or override ordering.

use std::collections::HashMap;

use crate::catalog::Permission;
use crate::context::UserAccessContext;
use crate::error::{RbacError, RbacResult};
use crate::modules::Module;
use crate::overrides::OverrideSet;
use crate::roles::{Role, RoleRegistry};

/// A user's effective permission matrix.
///
/// Derived, never persisted: recomputed on demand from roles and overrides.
/// Total over the catalog: exactly one boolean per permission id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessMatrix {
    entries: HashMap<Permission, bool>,
}

impl AccessMatrix {
    /// Get the effective value for a permission.
    pub fn is_allowed(&self, permission: &Permission) -> bool {
        self.entries.get(permission).copied().unwrap_or(false)
    }

    /// Iterate over every catalog permission with its effective value, in
    /// catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Permission, bool)> + '_ {
        Permission::all()
            .into_iter()
            .map(|p| (p, self.is_allowed(&p)))
    }

    /// Get the allowed permissions, in catalog order.
    pub fn allowed(&self) -> Vec<Permission> {
        self.iter().filter(|(_, v)| *v).map(|(p, _)| p).collect()
    }

    /// Get the number of entries (always the catalog size).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty. Never true for a resolved matrix.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the inherited value for one permission: any active role grants it.
fn inherited(roles: &[&Role], permission: &Permission) -> bool {
    roles.iter().any(|r| r.grants(permission))
}

/// Drop inactive roles before resolution.
fn active<'a, I>(roles: I) -> Vec<&'a Role>
where
    I: IntoIterator<Item = &'a Role>,
{
    roles
        .into_iter()
        .filter(|r| {
            if !r.is_active {
                tracing::debug!(role_id = %r.id, "inactive role skipped during resolution");
            }
            r.is_active
        })
        .collect()
}

/// Compute the effective permission matrix for a user.
///
/// For every permission in the catalog: the override value if one exists,
/// otherwise the inherited value from the active roles, otherwise deny.
///
/// # Example
///
/// ```
/// use backoffice_rbac::{resolve, OverrideSet, Permission, PermissionSet, Role};
///
/// let roles = vec![Role::new("role-editor", "Editor")
///     .with_permissions(PermissionSet::from_ids(&["products.view", "products.edit"]).unwrap())];
///
/// let mut overrides = OverrideSet::new();
/// overrides.set(Permission::parse("products.edit").unwrap(), false);
///
/// let matrix = resolve(&roles, &overrides);
/// assert!(matrix.is_allowed(&Permission::parse("products.view").unwrap()));
/// assert!(!matrix.is_allowed(&Permission::parse("products.edit").unwrap()));
/// ```
pub fn resolve<'a, I>(roles: I, overrides: &OverrideSet) -> AccessMatrix
where
    I: IntoIterator<Item = &'a Role>,
{
    let roles = active(roles);
    let catalog = Permission::all();
    let mut entries = HashMap::with_capacity(catalog.len());
    for permission in catalog {
        let value = match overrides.get(&permission) {
            Some(forced) => forced,
            None => inherited(&roles, &permission),
        };
        entries.insert(permission, value);
    }
    AccessMatrix { entries }
}

/// Resolve a caller-owned access context against the role registry.
///
/// Unknown role references are ignored with a warning; a stale id must not
/// fail the whole resolution.
pub fn resolve_context(registry: &RoleRegistry, ctx: &UserAccessContext) -> AccessMatrix {
    resolve(registry.roles_for(&ctx.role_ids), &ctx.overrides)
}

/// Compute the effective value for a single permission.
pub fn effective<'a, I>(roles: I, overrides: &OverrideSet, permission: &Permission) -> bool
where
    I: IntoIterator<Item = &'a Role>,
{
    match overrides.get(permission) {
        Some(forced) => forced,
        None => inherited(&active(roles), permission),
    }
}

/// Flip the effective value of one permission by writing an override.
///
/// The override's value is the negation of the current effective value; an
/// existing override at that id is replaced, never duplicated.
///
/// # Errors
///
/// [`RbacError::InvalidPermissionId`] if the id is not in the catalog (the
/// wildcard token included). The override set is untouched on error.
pub fn toggle_permission(
    roles: &[Role],
    overrides: &mut OverrideSet,
    permission_id: &str,
) -> RbacResult<Permission> {
    let permission = Permission::parse(permission_id)
        .ok_or_else(|| RbacError::InvalidPermissionId(permission_id.to_string()))?;
    let current = effective(roles, overrides, &permission);
    overrides.set(permission, !current);
    Ok(permission)
}

/// Toggle a whole module between full explicit allow and full explicit deny.
///
/// If every permission in the module is effectively active, the module's
/// overrides are replaced with an explicit deny for every id: OFF is an
/// explicit deny, not a reversion to inherited state, so bulk-deny is
/// idempotent regardless of role inheritance. Otherwise the module's
/// overrides are replaced with an explicit allow for every id. The module's
/// previous override set is always replaced, never merged.
///
/// # Errors
///
/// [`RbacError::InvalidModule`] for an unrecognized module id. The override
/// set is untouched on error.
pub fn toggle_module(
    roles: &[Role],
    overrides: &mut OverrideSet,
    module_id: &str,
) -> RbacResult<Module> {
    let module =
        Module::parse(module_id).ok_or_else(|| RbacError::InvalidModule(module_id.to_string()))?;

    let permissions = Permission::for_module(module);
    let all_active = permissions
        .iter()
        .all(|p| effective(roles, overrides, p));

    overrides.clear_module(module);
    for permission in permissions {
        overrides.set(permission, !all_active);
    }
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::catalog::PermissionSet;
    use crate::overrides::PermissionOverride;

    fn perm(id: &str) -> Permission {
        Permission::parse(id).unwrap()
    }

    fn editor_role() -> Role {
        Role::new("role-editor", "Editor").with_permissions(
            PermissionSet::from_ids(&["products.view", "products.edit"]).unwrap(),
        )
    }

    #[test]
    fn test_default_deny() {
        let matrix = resolve(&[], &OverrideSet::new());
        assert_eq!(matrix.len(), 60);
        for (permission, value) in matrix.iter() {
            assert!(!value, "{permission} should default to deny");
        }
    }

    #[test]
    fn test_matrix_is_total() {
        let roles = vec![editor_role()];
        let matrix = resolve(&roles, &OverrideSet::new());
        assert_eq!(matrix.len(), Permission::all().len());
        assert_eq!(matrix.iter().count(), 60);
    }

    #[test]
    fn test_wildcard_role_with_deny_override() {
        let roles = vec![Role::wildcard("role-admin", "Administrator")];
        let mut overrides = OverrideSet::new();
        overrides.set(perm("settings.delete"), false);

        let matrix = resolve(&roles, &overrides);
        assert!(!matrix.is_allowed(&perm("settings.delete")));
        assert!(matrix.is_allowed(&perm("settings.view")));
        assert_eq!(matrix.allowed().len(), 59);
    }

    #[test]
    fn test_override_beats_role_grant() {
        let roles = vec![editor_role()];
        let mut overrides = OverrideSet::new();
        overrides.set(perm("products.edit"), false);

        let matrix = resolve(&roles, &overrides);
        assert!(matrix.is_allowed(&perm("products.view")));
        assert!(!matrix.is_allowed(&perm("products.edit")));
    }

    #[test]
    fn test_allow_override_without_role_grant() {
        let mut overrides = OverrideSet::new();
        overrides.set(perm("payments.approve"), true);

        let matrix = resolve(&[], &overrides);
        assert!(matrix.is_allowed(&perm("payments.approve")));
    }

    #[test]
    fn test_duplicate_overrides_last_write_wins() {
        // A store that violated the at-most-one invariant collapses to the
        // last-applied value instead of erroring.
        let overrides = OverrideSet::from_entries([
            PermissionOverride {
                permission: perm("orders.view"),
                is_allowed: true,
            },
            PermissionOverride {
                permission: perm("orders.view"),
                is_allowed: false,
            },
        ]);

        let matrix = resolve(&[], &overrides);
        assert!(!matrix.is_allowed(&perm("orders.view")));
    }

    #[test]
    fn test_inactive_role_contributes_nothing() {
        let mut role = editor_role();
        role.is_active = false;

        let matrix = resolve(&[role], &OverrideSet::new());
        assert!(!matrix.is_allowed(&perm("products.view")));
    }

    #[test]
    fn test_resolve_context_ignores_unknown_roles() {
        let mut registry = RoleRegistry::new();
        registry.insert(editor_role());

        let ctx = UserAccessContext::new("user-1")
            .with_role("role-editor")
            .with_role("role-deleted");

        let matrix = resolve_context(&registry, &ctx);
        assert!(matrix.is_allowed(&perm("products.view")));
        assert!(!matrix.is_allowed(&perm("users.view")));
    }

    #[test]
    fn test_toggle_permission_flips_effective_value() {
        let roles = vec![editor_role()];
        let mut overrides = OverrideSet::new();

        // products.edit is inherited true; toggling forces a deny override.
        toggle_permission(&roles, &mut overrides, "products.edit").unwrap();
        assert_eq!(overrides.get(&perm("products.edit")), Some(false));
        assert!(!effective(&roles, &overrides, &perm("products.edit")));

        // Toggling again replaces the override, never duplicates it.
        toggle_permission(&roles, &mut overrides, "products.edit").unwrap();
        assert_eq!(overrides.get(&perm("products.edit")), Some(true));
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn test_toggle_permission_without_role_grant() {
        let mut overrides = OverrideSet::new();

        // users.delete is inherited false; toggling forces an allow override.
        toggle_permission(&[], &mut overrides, "users.delete").unwrap();
        assert_eq!(overrides.get(&perm("users.delete")), Some(true));
    }

    #[test]
    fn test_toggle_permission_rejects_invalid_ids() {
        let mut overrides = OverrideSet::new();

        let err = toggle_permission(&[], &mut overrides, "users.fly").unwrap_err();
        assert_eq!(err, RbacError::InvalidPermissionId("users.fly".to_string()));

        let err = toggle_permission(&[], &mut overrides, "*").unwrap_err();
        assert_eq!(err, RbacError::InvalidPermissionId("*".to_string()));

        assert!(overrides.is_empty(), "no mutation on rejected input");
    }

    #[test]
    fn test_toggle_module_alternates_full_deny_and_full_allow() {
        let roles = vec![Role::wildcard("role-admin", "Administrator")];
        let mut overrides = OverrideSet::new();

        // All orders permissions are active through the wildcard, so the
        // first toggle forces an explicit deny on the whole module.
        toggle_module(&roles, &mut overrides, "orders").unwrap();
        for p in Permission::for_module(Module::Orders) {
            assert!(!effective(&roles, &overrides, &p));
            assert_eq!(overrides.get(&p), Some(false), "deny must be explicit");
        }

        // The second toggle flips the module to full explicit allow.
        toggle_module(&roles, &mut overrides, "orders").unwrap();
        for p in Permission::for_module(Module::Orders) {
            assert!(effective(&roles, &overrides, &p));
        }

        // Strict alternation, regardless of role inheritance.
        toggle_module(&roles, &mut overrides, "orders").unwrap();
        for p in Permission::for_module(Module::Orders) {
            assert!(!effective(&roles, &overrides, &p));
        }
    }

    #[test]
    fn test_toggle_module_partially_active_becomes_full_allow() {
        let roles = vec![editor_role()];
        let mut overrides = OverrideSet::new();

        toggle_module(&roles, &mut overrides, "products").unwrap();
        for p in Permission::for_module(Module::Products) {
            assert_eq!(overrides.get(&p), Some(true));
        }
    }

    #[test]
    fn test_toggle_module_replaces_previous_overrides() {
        let mut overrides = OverrideSet::new();
        overrides.set(perm("products.delete"), true);
        overrides.set(perm("customers.view"), true);

        toggle_module(&[], &mut overrides, "products").unwrap();

        // Exactly one override per products permission, other modules intact.
        let products: Vec<_> = overrides
            .iter()
            .filter(|e| e.permission.module == Module::Products)
            .collect();
        assert_eq!(products.len(), 6);
        assert_eq!(overrides.len(), 7);
        assert_eq!(overrides.get(&perm("customers.view")), Some(true));
    }

    #[test]
    fn test_toggle_module_rejects_unknown_module() {
        let mut overrides = OverrideSet::new();
        let err = toggle_module(&[], &mut overrides, "inventory").unwrap_err();
        assert_eq!(err, RbacError::InvalidModule("inventory".to_string()));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let granting = Role::new("role-a", "A")
            .with_permissions(PermissionSet::from_ids(&["reports.view"]).unwrap());
        let unrelated = Role::new("role-b", "B")
            .with_permissions(PermissionSet::from_ids(&["content.view"]).unwrap());

        let forward = vec![granting.clone(), unrelated.clone()];
        let backward = vec![unrelated, granting];

        let overrides = OverrideSet::new();
        assert_eq!(resolve(&forward, &overrides), resolve(&backward, &overrides));
    }

    #[test]
    fn test_allowed_listing_is_catalog_ordered() {
        let roles = vec![Role::new("role-mixed", "Mixed").with_permissions(
            PermissionSet::from_ids(&["content.view", "users.view"]).unwrap(),
        )];
        let matrix = resolve(&roles, &OverrideSet::new());
        assert_eq!(
            matrix.allowed(),
            vec![
                Permission::new(Module::Users, Action::View),
                Permission::new(Module::Content, Action::View),
            ]
        );
    }
}
