//! Audit store implementations
//!
//! This module provides the ledger storage abstraction and the in-memory
//! reference implementation. The store is the persistence collaborator seam:
//! a failed append must surface to the caller, because a policy change whose
//! audit record was lost must not be reported as successful.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use backoffice_rbac::{Action, Module};

use crate::entry::AuditEntry;

/// Audit store error types.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to append an entry to the ledger.
    #[error("Failed to append audit entry: {0}")]
    AppendFailed(String),

    /// Failed to read entries from the ledger.
    #[error("Failed to read audit ledger: {0}")]
    ReadFailed(String),

    /// Failed to serialize a snapshot.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Filter for ledger reads. An unset field matches everything.
///
/// # Example
///
/// ```
/// use backoffice_audit::AuditFilter;
/// use backoffice_rbac::Module;
///
/// let filter = AuditFilter::new().with_module(Module::Roles);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditFilter {
    /// Match entries targeting this module.
    pub module: Option<Module>,

    /// Match entries performing this action.
    pub action: Option<Action>,

    /// Match entries attributed to this actor.
    pub actor_id: Option<String>,
}

impl AuditFilter {
    /// Create a filter matching every entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one module.
    pub fn with_module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    /// Restrict to one action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Restrict to one actor.
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Check whether an entry passes the filter.
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.module.map_or(true, |m| entry.module == m)
            && self.action.map_or(true, |a| entry.action == a)
            && self
                .actor_id
                .as_ref()
                .map_or(true, |id| entry.actor_id == *id)
    }
}

/// Ledger storage abstraction.
///
/// Implementations must be append-only: entries are never mutated or removed
/// once accepted. Reads are safe for unlimited concurrent callers; appends to
/// the same ledger must be serialized by the implementation.
pub trait AuditStore: Send + Sync {
    /// Append an entry to the ledger.
    fn append(&self, entry: AuditEntry) -> AuditResult<()>;

    /// List entries matching the filter, newest first.
    fn list(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditEntry>>;
}

/// In-memory audit store.
///
/// Suitable for single-process applications and testing. Reads proceed
/// concurrently; appends serialize on the interior lock.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    /// Entries in append order.
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Get the number of entries in the ledger.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditStore for MemoryAuditStore {
    fn append(&self, entry: AuditEntry) -> AuditResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuditError::AppendFailed("ledger lock poisoned".to_string()))?;
        entries.push(entry);
        Ok(())
    }

    fn list(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AuditError::ReadFailed("ledger lock poisoned".to_string()))?;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}
