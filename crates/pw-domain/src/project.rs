// project.rs — Project: the owning side of the pitch relationship.
//
// A project collects zero or more pitches. Standard projects take exactly
// one winner — completing a pitch cascade-closes its siblings. Contest
// projects keep entries alive through judging, and additionally carry the
// early-closure flag mutated by the contest closure workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The project's own lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Accepting and reviewing pitches.
    Open,

    /// Finalized — a winning pitch was completed.
    Completed,
}

/// What kind of project this is. The kind decides completion semantics:
/// standard projects cascade-close losing pitches, contests do not, and
/// client-management projects additionally notify the client via a signed
/// portal link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Standard,
    Contest,
    ClientManagement,
}

/// A project — owns its pitches and the contest-closure flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for this project.
    pub id: Uuid,

    /// The user who posted the project.
    pub owner_user_id: Uuid,

    /// Current lifecycle status.
    pub status: ProjectStatus,

    /// What kind of project this is.
    pub kind: ProjectKind,

    /// Budget in cents. A positive budget means the winning pitch is owed
    /// a payout; zero means completion requires no payment.
    pub budget_cents: i64,

    /// Optional deadline after which submissions close on their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<DateTime<Utc>>,

    /// When submissions were closed ahead of the deadline, if they were.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions_closed_early_at: Option<DateTime<Utc>>,

    /// Who closed submissions early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions_closed_early_by: Option<Uuid>,

    /// Why submissions were closed early.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_closure_reason: Option<String>,

    /// Whether contest judging has been finalized. Once set, the early
    /// closure can no longer be reopened.
    #[serde(default)]
    pub judging_finalized: bool,

    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new open project.
    pub fn new(owner_user_id: Uuid, kind: ProjectKind, budget_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_user_id,
            status: ProjectStatus::Open,
            kind,
            budget_cents,
            submission_deadline: None,
            submissions_closed_early_at: None,
            submissions_closed_early_by: None,
            early_closure_reason: None,
            judging_finalized: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_contest(&self) -> bool {
        self.kind == ProjectKind::Contest
    }

    pub fn is_open(&self) -> bool {
        self.status == ProjectStatus::Open
    }

    /// Whether submissions were closed ahead of the deadline.
    pub fn was_closed_early(&self) -> bool {
        self.submissions_closed_early_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_is_open() {
        let project = Project::new(Uuid::new_v4(), ProjectKind::Standard, 50_000);
        assert!(project.is_open());
        assert!(!project.is_contest());
        assert!(!project.was_closed_early());
        assert!(!project.judging_finalized);
    }

    #[test]
    fn contest_detection() {
        let project = Project::new(Uuid::new_v4(), ProjectKind::Contest, 0);
        assert!(project.is_contest());
    }

    #[test]
    fn closed_early_tracks_timestamp_field() {
        let mut project = Project::new(Uuid::new_v4(), ProjectKind::Contest, 0);
        assert!(!project.was_closed_early());
        project.submissions_closed_early_at = Some(Utc::now());
        assert!(project.was_closed_early());
    }

    #[test]
    fn serialization_round_trip() {
        let mut project = Project::new(Uuid::new_v4(), ProjectKind::ClientManagement, 12_500);
        project.submission_deadline = Some(Utc::now());

        let json = serde_json::to_string(&project).unwrap();
        let restored: Project = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, project.id);
        assert_eq!(restored.kind, ProjectKind::ClientManagement);
        assert_eq!(restored.budget_cents, 12_500);
    }

    #[test]
    fn contest_fields_omitted_when_unset() {
        let project = Project::new(Uuid::new_v4(), ProjectKind::Standard, 0);
        let json = serde_json::to_string(&project).unwrap();
        assert!(!json.contains("submissions_closed_early_at"));
        assert!(!json.contains("early_closure_reason"));
    }
}
