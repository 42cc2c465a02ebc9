// snapshot.rs — ReviewSnapshot: a frozen deliverable record under review.
//
// When a pitch goes into review, the deliverables it was judged on are
// frozen into a snapshot. The completion workflow marks the winner's
// snapshot Completed and denies any still-pending sibling snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a snapshot stands in review.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    /// Awaiting a review outcome.
    Pending,

    /// The snapshot belongs to the completed pitch.
    Completed,

    /// The snapshot's pitch lost — review never concluded.
    Denied,
}

/// A frozen deliverable record attached to exactly one pitch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    pub id: Uuid,
    pub pitch_id: Uuid,
    pub status: SnapshotStatus,
    pub created_at: DateTime<Utc>,
}

impl ReviewSnapshot {
    /// Create a pending snapshot for a pitch.
    pub fn pending(pitch_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            pitch_id,
            status: SnapshotStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SnapshotStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_is_pending() {
        let snapshot = ReviewSnapshot::pending(Uuid::new_v4());
        assert!(snapshot.is_pending());
    }

    #[test]
    fn serialization_round_trip() {
        let snapshot = ReviewSnapshot::pending(Uuid::new_v4());
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ReviewSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, snapshot.id);
        assert_eq!(restored.status, SnapshotStatus::Pending);
    }
}
