//! # Diff Engine
//!
//! Field-level, classified difference between two state snapshots. Pure and
//! side-effect free; invoked lazily when an inspector opens an audit entry,
//! never at write time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::Snapshot;

/// Classification of one field-level difference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    /// Present on both sides with different values.
    Changed,
    /// Present only in the new snapshot.
    Added,
    /// Present only in the old snapshot.
    Removed,
}

/// One classified field-level difference between two snapshots.
///
/// The side a field is absent from records `Value::Null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    /// The field that differs.
    pub field: String,
    /// Value in the old snapshot, `null` for added fields.
    pub old_value: Value,
    /// Value in the new snapshot, `null` for removed fields.
    pub new_value: Value,
    /// Classification of the difference.
    pub status: DiffStatus,
}

/// Compute the classified field-level difference between two snapshots.
///
/// Absent snapshots are treated as empty maps. Output order is
/// deterministic: fields present in the old snapshot first (in their
/// original order), then fields present only in the new snapshot (in their
/// original order). Fields with structurally equal values are omitted.
///
/// Equality is deep and canonical: nested maps compare by key/value content
/// regardless of key insertion order.
///
/// # Example
///
/// ```
/// use backoffice_audit::{diff, DiffStatus};
/// use serde_json::json;
///
/// let old = json!({"a": 1, "b": 2});
/// let new = json!({"a": 1, "b": 3, "c": 4});
/// let entries = diff(old.as_object(), new.as_object());
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].field, "b");
/// assert_eq!(entries[0].status, DiffStatus::Changed);
/// assert_eq!(entries[1].field, "c");
/// assert_eq!(entries[1].status, DiffStatus::Added);
/// ```
pub fn diff(old: Option<&Snapshot>, new: Option<&Snapshot>) -> Vec<DiffEntry> {
    let empty = Snapshot::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    let mut entries = Vec::new();

    for (field, old_value) in old {
        match new.get(field) {
            Some(new_value) if new_value == old_value => {}
            Some(new_value) => entries.push(DiffEntry {
                field: field.clone(),
                old_value: old_value.clone(),
                new_value: new_value.clone(),
                status: DiffStatus::Changed,
            }),
            None => entries.push(DiffEntry {
                field: field.clone(),
                old_value: old_value.clone(),
                new_value: Value::Null,
                status: DiffStatus::Removed,
            }),
        }
    }

    for (field, new_value) in new {
        if !old.contains_key(field) {
            entries.push(DiffEntry {
                field: field.clone(),
                old_value: Value::Null,
                new_value: new_value.clone(),
                status: DiffStatus::Added,
            });
        }
    }

    entries
}
