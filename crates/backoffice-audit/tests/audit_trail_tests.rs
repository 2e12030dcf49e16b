//! End-to-end tests for the audit trail around policy mutations.
//!
//! These tests walk the full flow an admin console drives: resolve a user's
//! effective access, mutate it through the audited policy wrapper, then
//! inspect the resulting ledger entries and their lazily computed diffs.

use backoffice_audit::{
    Actor, AuditFilter, AuditRecorder, AuditedPolicy, DiffStatus, MemoryAuditStore,
};
use backoffice_rbac::{
    resolve, Action, Module, OverrideSet, Permission, PermissionSet, Role,
};

/// Test fixture: an audited policy over a fresh in-memory ledger, plus a
/// small role set resembling a real deployment.
struct TestFixture {
    policy: AuditedPolicy<MemoryAuditStore>,
    roles: Vec<Role>,
    actor: Actor,
}

impl TestFixture {
    fn new() -> Self {
        let roles = vec![
            Role::wildcard("role-admin", "Administrator"),
            Role::new("role-editor", "Editor").with_permissions(
                PermissionSet::from_ids(&["products.view", "products.edit", "content.view"])
                    .unwrap(),
            ),
        ];

        Self {
            policy: AuditedPolicy::new(AuditRecorder::new(MemoryAuditStore::new())),
            roles,
            actor: Actor::new("user-ops", "Avery Quinn", "Administrator"),
        }
    }

    fn editor_roles(&self) -> Vec<Role> {
        vec![self.roles[1].clone()]
    }
}

#[test]
fn toggling_a_permission_lands_in_the_ledger_with_a_diffable_entry() {
    let fx = TestFixture::new();
    let roles = fx.editor_roles();
    let mut overrides = OverrideSet::new();

    // products.edit is role-inherited; the toggle writes a deny override.
    fx.policy
        .toggle_permission(&fx.actor, &roles, &mut overrides, "products.edit")
        .unwrap();

    let matrix = resolve(&roles, &overrides);
    assert!(!matrix.is_allowed(&Permission::parse("products.edit").unwrap()));
    assert!(matrix.is_allowed(&Permission::parse("products.view").unwrap()));

    let entries = fx.policy.recorder().list(&AuditFilter::new()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].actor_name, "Avery Quinn");

    let changes = entries[0].diff();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].status, DiffStatus::Changed);
}

#[test]
fn module_toggle_alternates_and_every_step_is_audited() {
    let fx = TestFixture::new();
    let roles = vec![fx.roles[0].clone()];
    let mut overrides = OverrideSet::new();

    // All payments permissions active via the wildcard role: first toggle
    // denies the whole module, second restores full allow.
    fx.policy
        .toggle_module(&fx.actor, &roles, &mut overrides, "payments")
        .unwrap();
    let matrix = resolve(&roles, &overrides);
    for p in Permission::for_module(Module::Payments) {
        assert!(!matrix.is_allowed(&p));
    }

    fx.policy
        .toggle_module(&fx.actor, &roles, &mut overrides, "payments")
        .unwrap();
    let matrix = resolve(&roles, &overrides);
    for p in Permission::for_module(Module::Payments) {
        assert!(matrix.is_allowed(&p));
    }

    let entries = fx.policy.recorder().list(&AuditFilter::new()).unwrap();
    assert_eq!(entries.len(), 2);
    // Newest first: both override edits attributed to the users module.
    assert!(entries.iter().all(|e| e.module == Module::Users));
    assert!(entries[0].occurred_at >= entries[1].occurred_at);
}

#[test]
fn ledger_survives_role_and_settings_changes_and_filters_compose() {
    let fx = TestFixture::new();

    let support = Role::new("role-support", "Support")
        .with_permissions(PermissionSet::from_ids(&["customers.view", "orders.view"]).unwrap());
    fx.policy
        .record_role_change(&fx.actor, Action::Create, None, Some(&support))
        .unwrap();

    let mut widened = support.clone();
    widened
        .permissions
        .add(Permission::parse("orders.edit").unwrap());
    fx.policy
        .record_role_change(&fx.actor, Action::Edit, Some(&support), Some(&widened))
        .unwrap();

    let old = backoffice_audit::to_snapshot(&serde_json::json!({"currency": "USD"})).unwrap();
    let new = backoffice_audit::to_snapshot(&serde_json::json!({"currency": "EUR"})).unwrap();
    fx.policy
        .record_settings_change(&fx.actor, &old, &new)
        .unwrap();

    let all = fx.policy.recorder().list(&AuditFilter::new()).unwrap();
    assert_eq!(all.len(), 3);

    let role_entries = fx
        .policy
        .recorder()
        .list(&AuditFilter::new().with_module(Module::Roles))
        .unwrap();
    assert_eq!(role_entries.len(), 2);

    let role_edits = fx
        .policy
        .recorder()
        .list(
            &AuditFilter::new()
                .with_module(Module::Roles)
                .with_action(Action::Edit),
        )
        .unwrap();
    assert_eq!(role_edits.len(), 1);

    // The role edit's diff shows only the permission set widening.
    let changes = role_edits[0].diff();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "permissions");

    // The settings change diff reads as a single changed field.
    let settings_entries = fx
        .policy
        .recorder()
        .list(&AuditFilter::new().with_module(Module::Settings))
        .unwrap();
    let changes = settings_entries[0].diff();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].field, "currency");
    assert_eq!(changes[0].old_value, serde_json::json!("USD"));
    assert_eq!(changes[0].new_value, serde_json::json!("EUR"));
}

#[test]
fn repeated_reads_return_identical_history() {
    let fx = TestFixture::new();
    let mut overrides = OverrideSet::new();

    fx.policy
        .toggle_permission(&fx.actor, &fx.roles, &mut overrides, "reports.export")
        .unwrap();

    let first = fx.policy.recorder().list(&AuditFilter::new()).unwrap();
    let second = fx.policy.recorder().list(&AuditFilter::new()).unwrap();
    assert_eq!(first, second);
}
