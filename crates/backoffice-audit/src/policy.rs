//! Audited policy mutations
//!
//! Wraps the resolver's override mutations, and the role/settings changes of
//! the external collaborators, with before/after snapshot capture. Mutations
//! are staged on a copy and only committed to the caller's state once the
//! ledger append succeeded, so a failed append can never leave an unaudited
//! change behind.

use thiserror::Error;

use backoffice_rbac::{
    toggle_module, toggle_permission, Action, Module, OverrideSet, RbacError, Role,
};

use crate::entry::{to_snapshot, Actor, AuditEntry, Snapshot};
use crate::recorder::AuditRecorder;
use crate::store::{AuditError, AuditStore};

/// Error type for audited policy mutations.
#[derive(Debug, Error)]
pub enum PolicyAuditError {
    /// The policy mutation itself was rejected; nothing was recorded.
    #[error(transparent)]
    Rbac(#[from] RbacError),

    /// The ledger append failed; the mutation was not committed.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Audit-wrapped policy mutations.
///
/// # Example
///
/// ```
/// use backoffice_audit::{Actor, AuditedPolicy, AuditRecorder, MemoryAuditStore};
/// use backoffice_rbac::{OverrideSet, Role};
///
/// let policy = AuditedPolicy::new(AuditRecorder::new(MemoryAuditStore::new()));
/// let actor = Actor::new("user-1", "Avery Quinn", "Administrator");
///
/// let roles = vec![Role::wildcard("role-admin", "Administrator")];
/// let mut overrides = OverrideSet::new();
///
/// let entry = policy
///     .toggle_permission(&actor, &roles, &mut overrides, "payments.approve")
///     .unwrap();
/// assert_eq!(entry.actor_id, "user-1");
/// assert_eq!(overrides.len(), 1);
/// ```
#[derive(Debug)]
pub struct AuditedPolicy<S: AuditStore> {
    recorder: AuditRecorder<S>,
}

impl<S: AuditStore> AuditedPolicy<S> {
    /// Create an audited policy over the given recorder.
    pub fn new(recorder: AuditRecorder<S>) -> Self {
        Self { recorder }
    }

    /// Access the underlying recorder (for ledger reads).
    pub fn recorder(&self) -> &AuditRecorder<S> {
        &self.recorder
    }

    /// Toggle one permission for a user, recording the override-set change.
    ///
    /// The mutation is staged on a copy of the override set; the caller's
    /// set is only updated after the ledger accepted the entry.
    pub fn toggle_permission(
        &self,
        actor: &Actor,
        roles: &[Role],
        overrides: &mut OverrideSet,
        permission_id: &str,
    ) -> Result<AuditEntry, PolicyAuditError> {
        let mut staged = overrides.clone();
        toggle_permission(roles, &mut staged, permission_id)?;
        let entry = self.commit_override_change(actor, overrides, staged)?;
        Ok(entry)
    }

    /// Toggle a whole module for a user, recording the override-set change.
    pub fn toggle_module(
        &self,
        actor: &Actor,
        roles: &[Role],
        overrides: &mut OverrideSet,
        module_id: &str,
    ) -> Result<AuditEntry, PolicyAuditError> {
        let mut staged = overrides.clone();
        toggle_module(roles, &mut staged, module_id)?;
        let entry = self.commit_override_change(actor, overrides, staged)?;
        Ok(entry)
    }

    /// Record a role lifecycle change from the role-management collaborator.
    ///
    /// Pass `old_role = None` for creation, `new_role = None` for deletion.
    pub fn record_role_change(
        &self,
        actor: &Actor,
        action: Action,
        old_role: Option<&Role>,
        new_role: Option<&Role>,
    ) -> Result<AuditEntry, PolicyAuditError> {
        let old = old_role.map(to_snapshot).transpose()?;
        let new = new_role.map(to_snapshot).transpose()?;
        let entry =
            self.recorder
                .record(actor, Module::Roles, action, old.as_ref(), new.as_ref())?;
        Ok(entry)
    }

    /// Record a protected-configuration change.
    pub fn record_settings_change(
        &self,
        actor: &Actor,
        old: &Snapshot,
        new: &Snapshot,
    ) -> Result<AuditEntry, PolicyAuditError> {
        let entry =
            self.recorder
                .record(actor, Module::Settings, Action::Edit, Some(old), Some(new))?;
        Ok(entry)
    }

    /// Record the staged override change and commit it to the caller's set.
    ///
    /// Override toggles edit a user's access assignment, so they are
    /// attributed to the users module.
    fn commit_override_change(
        &self,
        actor: &Actor,
        overrides: &mut OverrideSet,
        staged: OverrideSet,
    ) -> Result<AuditEntry, PolicyAuditError> {
        let before = to_snapshot(overrides)?;
        let after = to_snapshot(&staged)?;
        let entry = self.recorder.record(
            actor,
            Module::Users,
            Action::Edit,
            Some(&before),
            Some(&after),
        )?;
        *overrides = staged;
        Ok(entry)
    }
}
