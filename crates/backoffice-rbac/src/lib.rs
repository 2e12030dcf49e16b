//! # Backoffice RBAC (Role-Based Access Control)
//!
//! This crate provides the access-control core for the Backoffice admin
//! platform: the permission catalog, role records, per-user overrides, and
//! the policy resolver that combines them into an effective permission
//! matrix.
//!
//! ## Overview
//!
//! The backoffice-rbac crate handles:
//! - **Catalog**: the fixed universe of valid `module.action` permission ids
//! - **Roles**: named permission grants, including wildcard roles
//! - **Overrides**: per-user allow/deny exceptions with highest precedence
//! - **Resolution**: the deterministic effective-access computation and the
//!   two override-writing mutations (single toggle, module toggle)
//!
//! ## Architecture
//!
//! ```text
//! Permission = Module + Action        e.g. "products.edit"
//!
//! effective(id) = override(id)        if a per-user override exists
//!               | any role grants id  otherwise (wildcard grants all)
//!               | deny                by default
//! ```
//!
//! Resolution state is caller-owned: roles come in by value from the
//! role-management collaborator, overrides travel inside a
//! [`UserAccessContext`]. The crate holds no ambient per-user state.
//!
//! ## Usage
//!
//! ```rust
//! use backoffice_rbac::{
//!     resolve, toggle_module, Permission, PermissionSet, OverrideSet, Role,
//! };
//!
//! let roles = vec![Role::new("role-editor", "Editor")
//!     .with_permissions(PermissionSet::from_ids(&["products.view", "products.edit"]).unwrap())];
//! let mut overrides = OverrideSet::new();
//!
//! let matrix = resolve(&roles, &overrides);
//! assert!(matrix.is_allowed(&Permission::parse("products.view").unwrap()));
//!
//! // Force the whole module to an explicit allow.
//! toggle_module(&roles, &mut overrides, "products").unwrap();
//! let matrix = resolve(&roles, &overrides);
//! assert!(matrix.is_allowed(&Permission::parse("products.delete").unwrap()));
//! ```
//!
//! ## Integration with backoffice-audit
//!
//! Mutations to roles and overrides are security-relevant; the
//! `backoffice-audit` crate wraps them with before/after snapshot capture so
//! every change lands in the audit ledger.

pub mod actions;
pub mod catalog;
pub mod context;
pub mod error;
pub mod modules;
pub mod overrides;
pub mod resolver;
pub mod roles;

// Re-export main types for convenience
pub use actions::Action;
pub use catalog::{is_valid_permission_id, Permission, PermissionSet, WILDCARD};
pub use context::UserAccessContext;
pub use error::{RbacError, RbacResult};
pub use modules::Module;
pub use overrides::{OverrideSet, PermissionOverride};
pub use resolver::{
    effective, resolve, resolve_context, toggle_module, toggle_permission, AccessMatrix,
};
pub use roles::{Role, RoleRegistry};
