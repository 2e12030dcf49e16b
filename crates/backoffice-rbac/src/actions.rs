//! # Actions
//!
//! Defines the fixed set of actions that can be performed within a module.
//! Together with [`Module`](crate::Module), actions form the permission
//! catalog's cross product.

use serde::{Deserialize, Serialize};

/// Actions that can be performed within a module.
///
/// - **View**: read module data
/// - **Create**: create new records
/// - **Edit**: modify existing records
/// - **Delete**: remove records
/// - **Approve**: approve pending records or changes
/// - **Export**: export module data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// View module data.
    View,
    /// Create new records.
    Create,
    /// Modify existing records.
    Edit,
    /// Remove records.
    Delete,
    /// Approve pending records or changes.
    Approve,
    /// Export module data.
    Export,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Export => "export",
        }
    }

    /// Parse an action from its wire representation.
    ///
    /// Matching is exact and case-sensitive, same as [`Module::parse`].
    ///
    /// [`Module::parse`]: crate::Module::parse
    ///
    /// # Example
    ///
    /// ```
    /// use backoffice_rbac::Action;
    ///
    /// assert_eq!(Action::parse("view"), Some(Action::View));
    /// assert_eq!(Action::parse("VIEW"), None);
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "edit" => Some(Action::Edit),
            "delete" => Some(Action::Delete),
            "approve" => Some(Action::Approve),
            "export" => Some(Action::Export),
            _ => None,
        }
    }

    /// Get all actions in catalog declaration order.
    pub fn all() -> Vec<Self> {
        vec![
            Action::View,
            Action::Create,
            Action::Edit,
            Action::Delete,
            Action::Approve,
            Action::Export,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
