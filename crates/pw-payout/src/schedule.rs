// schedule.rs — PayoutSchedule: one scheduled payout and its bypass record.
//
// References its pitch and project by id; amounts live outside this engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::WorkflowType;

/// A scheduled payout waiting for its hold release date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutSchedule {
    /// Unique identifier for this schedule.
    pub id: Uuid,

    /// The completed pitch this payout belongs to.
    pub pitch_id: Uuid,

    /// The project that funded it.
    pub project_id: Uuid,

    /// Which hold-day table row produced the release date.
    pub workflow_type: WorkflowType,

    /// When the funds become releasable.
    pub hold_release_date: DateTime<Utc>,

    /// Whether an admin bypassed the hold.
    #[serde(default)]
    pub hold_bypassed: bool,

    /// Why the hold was bypassed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_reason: Option<String>,

    /// Which admin bypassed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_admin_id: Option<Uuid>,

    /// When the bypass happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypassed_at: Option<DateTime<Utc>>,
}

impl PayoutSchedule {
    /// Create a schedule with its computed release date and no bypass.
    pub fn new(
        pitch_id: Uuid,
        project_id: Uuid,
        workflow_type: WorkflowType,
        hold_release_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pitch_id,
            project_id,
            workflow_type,
            hold_release_date,
            hold_bypassed: false,
            bypass_reason: None,
            bypass_admin_id: None,
            bypassed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_schedule_has_no_bypass() {
        let schedule = PayoutSchedule::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            WorkflowType::Standard,
            Utc::now(),
        );
        assert!(!schedule.hold_bypassed);
        assert!(schedule.bypass_reason.is_none());
        assert!(schedule.bypass_admin_id.is_none());
    }

    #[test]
    fn serialization_round_trip() {
        let schedule = PayoutSchedule::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            WorkflowType::Contest,
            Utc::now(),
        );
        let json = serde_json::to_string(&schedule).unwrap();
        let restored: PayoutSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, schedule.id);
        assert_eq!(restored.workflow_type, WorkflowType::Contest);
        assert!(!json.contains("bypass_reason"));
    }
}
