//! # Audit Recorder
//!
//! Captures immutable before/after snapshots around security-relevant
//! mutations and appends them to the ledger. Snapshots are deep-copied at
//! call time, so later mutation of the caller's live objects cannot corrupt
//! history.

use backoffice_rbac::{Action, Module};

use crate::entry::{Actor, AuditEntry, Snapshot};
use crate::store::{AuditFilter, AuditResult, AuditStore};

/// Records mutations into an append-only ledger.
///
/// # Example
///
/// ```
/// use backoffice_audit::{to_snapshot, Actor, AuditFilter, AuditRecorder, MemoryAuditStore};
/// use backoffice_rbac::{Action, Module};
/// use serde_json::json;
///
/// let recorder = AuditRecorder::new(MemoryAuditStore::new());
/// let actor = Actor::new("user-1", "Avery Quinn", "Administrator");
///
/// let old = to_snapshot(&json!({"name": "Spring sale"})).unwrap();
/// let new = to_snapshot(&json!({"name": "Summer sale"})).unwrap();
/// recorder
///     .record(&actor, Module::Content, Action::Edit, Some(&old), Some(&new))
///     .unwrap();
///
/// assert_eq!(recorder.list(&AuditFilter::new()).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct AuditRecorder<S: AuditStore> {
    store: S,
}

impl<S: AuditStore> AuditRecorder<S> {
    /// Create a recorder backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a mutation.
    ///
    /// Deep-copies the snapshots, assigns a time-ordered id and timestamp,
    /// appends to the ledger, and returns the stored entry. A store failure
    /// is fatal to the caller: the mutation must not be reported successful
    /// without its ledger record.
    pub fn record(
        &self,
        actor: &Actor,
        module: Module,
        action: Action,
        old_data: Option<&Snapshot>,
        new_data: Option<&Snapshot>,
    ) -> AuditResult<AuditEntry> {
        let entry = AuditEntry::new(actor, module, action, old_data.cloned(), new_data.cloned());
        self.store.append(entry.clone())?;
        tracing::debug!(
            entry_id = %entry.id,
            actor_id = %entry.actor_id,
            module = %entry.module,
            action = %entry.action,
            "audit entry recorded"
        );
        Ok(entry)
    }

    /// List ledger entries matching the filter, newest first.
    pub fn list(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditEntry>> {
        self.store.list(filter)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
