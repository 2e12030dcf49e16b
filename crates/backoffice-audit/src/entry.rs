//! Audit entry types
//!
//! This module defines the immutable ledger entry and the snapshot type it
//! carries. The serde shape of [`AuditEntry`] is the durable at-rest contract
//! that export and compliance tooling depend on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use backoffice_rbac::{Action, Module};

use crate::diff::{diff, DiffEntry};
use crate::store::{AuditError, AuditResult};

/// A flat key→value state snapshot, captured by value at mutation time.
///
/// Values may themselves be lists or maps; the map type preserves the
/// caller's key insertion order, which the diff engine's output ordering
/// relies on.
pub type Snapshot = serde_json::Map<String, Value>;

/// Convert any serializable state into a snapshot.
///
/// Non-object values are wrapped under a `"value"` key so that every
/// snapshot stays a flat map.
pub fn to_snapshot<T: Serialize>(state: &T) -> AuditResult<Snapshot> {
    match serde_json::to_value(state).map_err(|e| AuditError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => {
            let mut map = Snapshot::new();
            map.insert("value".to_string(), other);
            Ok(map)
        }
    }
}

/// The acting identity an entry is attributed to.
///
/// Supplied by the identity/session collaborator; the core never
/// authenticates, only attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Actor id.
    pub id: String,
    /// Display name at the time of the action.
    pub name: String,
    /// The actor's role at the time of the action.
    pub role: String,
}

impl Actor {
    /// Create a new actor attribution.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}

/// One immutable record in the audit ledger.
///
/// Entries are created once and never mutated or deleted. `old_data` and
/// `new_data` may each independently be absent: a pure creation has no
/// `old_data`, a pure destruction no `new_data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// Unique, time-ordered entry id.
    pub id: Uuid,

    /// Id of the acting user.
    pub actor_id: String,

    /// Display name of the acting user at mutation time.
    pub actor_name: String,

    /// The actor's role at mutation time.
    pub role_at_time: String,

    /// Module the mutation targeted.
    pub module: Module,

    /// Action performed.
    pub action: Action,

    /// State before the mutation, if any existed.
    pub old_data: Option<Snapshot>,

    /// State after the mutation, if any remains.
    pub new_data: Option<Snapshot>,

    /// When the mutation occurred.
    pub occurred_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Create a new entry with a fresh id and timestamp.
    ///
    /// Snapshots are taken by value; the recorder deep-copies them from the
    /// caller's live objects before this runs.
    pub fn new(
        actor: &Actor,
        module: Module,
        action: Action,
        old_data: Option<Snapshot>,
        new_data: Option<Snapshot>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            role_at_time: actor.role.clone(),
            module,
            action,
            old_data,
            new_data,
            occurred_at: Utc::now(),
        }
    }

    /// Compute the field-level diff between this entry's snapshots.
    ///
    /// Computed on demand when an inspector looks at the entry; never stored
    /// alongside it.
    pub fn diff(&self) -> Vec<DiffEntry> {
        diff(self.old_data.as_ref(), self.new_data.as_ref())
    }
}
