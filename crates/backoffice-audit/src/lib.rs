//! # Backoffice Audit
//!
//! This crate provides the audit trail engine for the Backoffice admin
//! platform: an append-only ledger of security-relevant mutations with
//! immutable before/after snapshots, and the structural diff engine used to
//! inspect them.
//!
//! ## Overview
//!
//! The backoffice-audit crate handles:
//! - **Entries**: immutable, actor-attributed ledger records
//! - **Snapshots**: deep-copied before/after state captured at mutation time
//! - **Diffing**: lazy, field-level classified differences between snapshots
//! - **Recording**: the append path, with store failures fatal to the
//!   wrapped mutation
//! - **Audited mutations**: policy changes from `backoffice-rbac` staged and
//!   committed only once their ledger record landed
//!
//! ## Architecture
//!
//! ```text
//! caller ──mutation──▶ AuditedPolicy ──stage──▶ backoffice-rbac
//!                          │
//!                          ├─ before/after Snapshot (deep copy)
//!                          ▼
//!                    AuditRecorder ──append──▶ AuditStore (ledger)
//!
//! inspector ──list()──▶ AuditEntry ──diff()──▶ [DiffEntry]   (on demand)
//! ```
//!
//! Snapshots are never diffed at write time; the diff is computed when a
//! human inspects a specific entry.
//!
//! ## Usage
//!
//! ```rust
//! use backoffice_audit::{Actor, AuditFilter, AuditRecorder, AuditedPolicy, MemoryAuditStore};
//! use backoffice_rbac::{OverrideSet, Role};
//!
//! let policy = AuditedPolicy::new(AuditRecorder::new(MemoryAuditStore::new()));
//! let actor = Actor::new("user-1", "Avery Quinn", "Administrator");
//!
//! let roles = vec![Role::wildcard("role-admin", "Administrator")];
//! let mut overrides = OverrideSet::new();
//! policy
//!     .toggle_permission(&actor, &roles, &mut overrides, "payments.approve")
//!     .unwrap();
//!
//! let entries = policy.recorder().list(&AuditFilter::new()).unwrap();
//! let changes = entries[0].diff();
//! assert!(!changes.is_empty());
//! ```

pub mod diff;
pub mod entry;
pub mod policy;
pub mod recorder;
pub mod store;

// Re-export main types for convenience
pub use diff::{diff, DiffEntry, DiffStatus};
pub use entry::{to_snapshot, Actor, AuditEntry, Snapshot};
pub use policy::{AuditedPolicy, PolicyAuditError};
pub use recorder::AuditRecorder;
pub use store::{AuditError, AuditFilter, AuditResult, AuditStore, MemoryAuditStore};
