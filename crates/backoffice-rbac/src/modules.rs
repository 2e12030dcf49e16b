//! # Modules
//!
//! Defines the fixed set of admin-console modules that permissions apply to.
//! Every permission in the catalog is scoped to exactly one module.

use serde::{Deserialize, Serialize};

/// Admin-console modules that can have permissions assigned.
///
/// The set is closed: permission ids are only valid for these modules, and
/// the catalog is the cross product of modules and actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// User accounts and their access assignments.
    Users,
    /// Role definitions and their permission grants.
    Roles,
    /// Product records.
    Products,
    /// Product categories.
    Categories,
    /// Customer orders.
    Orders,
    /// Customer records.
    Customers,
    /// Payments and refunds.
    Payments,
    /// Reporting and analytics.
    Reports,
    /// Protected platform configuration.
    Settings,
    /// CMS content (pages, banners).
    Content,
}

impl Module {
    /// Get the string representation of the module.
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Users => "users",
            Module::Roles => "roles",
            Module::Products => "products",
            Module::Categories => "categories",
            Module::Orders => "orders",
            Module::Customers => "customers",
            Module::Payments => "payments",
            Module::Reports => "reports",
            Module::Settings => "settings",
            Module::Content => "content",
        }
    }

    /// Parse a module from its wire representation.
    ///
    /// Matching is exact and case-sensitive: module segments in permission
    /// ids are lowercase by contract, so `"Users"` is not a valid module.
    ///
    /// # Example
    ///
    /// ```
    /// use backoffice_rbac::Module;
    ///
    /// assert_eq!(Module::parse("orders"), Some(Module::Orders));
    /// assert_eq!(Module::parse("Orders"), None);
    /// assert_eq!(Module::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Module::Users),
            "roles" => Some(Module::Roles),
            "products" => Some(Module::Products),
            "categories" => Some(Module::Categories),
            "orders" => Some(Module::Orders),
            "customers" => Some(Module::Customers),
            "payments" => Some(Module::Payments),
            "reports" => Some(Module::Reports),
            "settings" => Some(Module::Settings),
            "content" => Some(Module::Content),
            _ => None,
        }
    }

    /// Get all modules in catalog declaration order.
    pub fn all() -> Vec<Self> {
        vec![
            Module::Users,
            Module::Roles,
            Module::Products,
            Module::Categories,
            Module::Orders,
            Module::Customers,
            Module::Payments,
            Module::Reports,
            Module::Settings,
            Module::Content,
        ]
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
