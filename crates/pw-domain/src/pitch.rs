// pitch.rs — Pitch: one unit of submitted work attached to a project.
//
// A pitch carries two independent status tracks:
// - `status`: where the submission sits in the review lifecycle
// - `payment_status`: where the payout sits, mutated only by the
//   completion workflow
//
// Status moves are validated against a TransitionTable (see transition.rs);
// the completion workflow additionally guards on payment_status so a pitch
// can never be finalized twice.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest rating a project owner can leave on a completed pitch.
pub const MIN_RATING: u8 = 1;

/// Highest rating a project owner can leave on a completed pitch.
pub const MAX_RATING: u8 = 5;

/// Check whether a rating value is inside the accepted [1, 5] range.
pub fn valid_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// The review-lifecycle status of a pitch.
///
/// Which moves between these are legal is configuration — see
/// [`TransitionTable`](crate::transition::TransitionTable). The enum itself
/// stays free of edge knowledge.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum PitchStatus {
    /// Submitted and awaiting the project owner's review.
    Pending,

    /// The submitter is actively reworking the pitch.
    InProgress,

    /// The project owner accepted the work — eligible for completion.
    Approved,

    /// The project owner asked for changes.
    RevisionsRequested,

    /// The project owner rejected the pitch.
    Denied,

    /// Finalized as the winning submission. Terminal.
    Completed,

    /// Taken out of the running (cascade-closed or withdrawn).
    Closed,
}

impl PitchStatus {
    /// Every status, in declaration order. Used by table validation.
    pub const ALL: [PitchStatus; 7] = [
        PitchStatus::Pending,
        PitchStatus::InProgress,
        PitchStatus::Approved,
        PitchStatus::RevisionsRequested,
        PitchStatus::Denied,
        PitchStatus::Completed,
        PitchStatus::Closed,
    ];
}

impl fmt::Display for PitchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchStatus::Pending => write!(f, "pending"),
            PitchStatus::InProgress => write!(f, "in_progress"),
            PitchStatus::Approved => write!(f, "approved"),
            PitchStatus::RevisionsRequested => write!(f, "revisions_requested"),
            PitchStatus::Denied => write!(f, "denied"),
            PitchStatus::Completed => write!(f, "completed"),
            PitchStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Where the payout for a pitch stands.
///
/// Only the completion workflow assigns `Pending`/`NotRequired`; the payment
/// processor (outside this engine) moves `Pending → Processing → Paid`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payout decision has been made yet.
    None,

    /// A payout is owed and waiting for its hold release date.
    Pending,

    /// The pitch was completed on a zero-budget project — nothing to pay.
    NotRequired,

    /// The payment processor has picked up the payout.
    Processing,

    /// The payout settled.
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::None => write!(f, "none"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::NotRequired => write!(f, "not_required"),
            PaymentStatus::Processing => write!(f, "processing"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

/// What kind of history entry a [`PitchEvent`] records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PitchEventKind {
    /// The pitch moved from one status to another.
    StatusChange,
}

/// An immutable history entry on a pitch.
///
/// Appended by the workflows on every status move; never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchEvent {
    /// Unique identifier for this entry.
    pub event_id: Uuid,

    /// What kind of entry this is.
    pub kind: PitchEventKind,

    /// Who caused the change.
    pub actor_id: Uuid,

    /// Status before the change.
    pub from_status: PitchStatus,

    /// Status after the change.
    pub to_status: PitchStatus,

    /// Rating left alongside the change (completion only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Free-text comment left alongside the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// When the change happened (UTC).
    pub timestamp: DateTime<Utc>,
}

impl PitchEvent {
    /// Create a status-change entry. Rating and comment start empty —
    /// chain the `with_*` builders to fill them in.
    pub fn status_change(
        actor_id: Uuid,
        from: PitchStatus,
        to: PitchStatus,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind: PitchEventKind::StatusChange,
            actor_id,
            from_status: from,
            to_status: to,
            rating: None,
            comment: None,
            timestamp,
        }
    }

    /// Attach a rating and return self (builder pattern).
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a free-text comment and return self.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A pitch — one unit of submitted work, owned by exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    /// Unique identifier for this pitch.
    pub id: Uuid,

    /// The project this pitch was submitted to.
    pub project_id: Uuid,

    /// The user who submitted the pitch.
    pub owner_user_id: Uuid,

    /// Current review-lifecycle status.
    pub status: PitchStatus,

    /// Current payout status.
    pub payment_status: PaymentStatus,

    /// When the pitch was finalized, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Rating left by the project owner at completion (1–5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Feedback left by the project owner at completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    /// Append-only status-change history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<PitchEvent>,

    /// When the pitch was submitted.
    pub created_at: DateTime<Utc>,

    /// When the pitch was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Pitch {
    /// Create a new pitch in the Pending status with no payout decision.
    pub fn new(project_id: Uuid, owner_user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            owner_user_id,
            status: PitchStatus::Pending,
            payment_status: PaymentStatus::None,
            completed_at: None,
            rating: None,
            feedback: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the payout has been handed to the processor or settled.
    /// A pitch in this state can never be completed (again) or re-routed.
    pub fn payment_finalized(&self) -> bool {
        matches!(
            self.payment_status,
            PaymentStatus::Processing | PaymentStatus::Paid
        )
    }

    /// Append a history entry and bump `updated_at` to the entry's timestamp.
    pub fn record(&mut self, event: PitchEvent) {
        self.updated_at = event.timestamp;
        self.history.push(event);
    }
}
