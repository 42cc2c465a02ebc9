// entry.rs — Audit entry data model.
//
// Privileged operations leave one entry each. Entries chain via
// `previous_hash` so tampering is detectable; the chain link is filled in
// by AuditLog at append time, never by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which privileged operation this entry records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Contest submissions were closed ahead of the deadline.
    EarlyClosure,

    /// An early closure was reverted.
    SubmissionsReopened,

    /// A payout hold was bypassed by an admin.
    HoldBypass,
}

/// A single audit entry — one line in the JSONL audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier for this entry.
    pub entry_id: Uuid,

    /// When the operation happened (UTC).
    pub timestamp: DateTime<Utc>,

    /// The acting user.
    pub actor_id: Uuid,

    /// What was done.
    pub action: AuditAction,

    /// The project or payout schedule the action targeted.
    pub subject_id: Uuid,

    /// Hash of the previous entry in the log (tamper detection).
    /// The first entry in a log has this set to None.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,

    /// Arbitrary additional data (entry counts, bypass reasons).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AuditEntry {
    /// Create an entry with empty metadata. The hash link stays None until
    /// the log appends it.
    pub fn new(
        actor_id: Uuid,
        action: AuditAction,
        subject_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            timestamp,
            actor_id,
            action,
            subject_id,
            previous_hash: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach metadata and return self (builder pattern).
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
