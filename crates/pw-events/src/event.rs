// event.rs — The notification event model.
//
// The lifecycle engine emits one event per notification-worthy outcome:
// pitch completed, sibling closed, contest closed/reopened, portal link
// issued. Sinks receive the full typed event and decide how to render it
// (email, webhook, in-app). Timestamps are passed in by the caller so the
// engine's injected clock stays authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the lifecycle engine after a successful mutation.
///
/// These are stable types host sinks can depend on. Every variant that
/// targets a user carries the recipient explicitly — fan-out to multiple
/// recipients means multiple events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// A pitch was finalized as the winning submission.
    PitchCompleted {
        pitch_id: Uuid,
        project_id: Uuid,
        recipient_user_id: Uuid,
        rating: Option<u8>,
        timestamp: DateTime<Utc>,
    },

    /// A sibling pitch was closed by the completion cascade.
    PitchClosed {
        pitch_id: Uuid,
        project_id: Uuid,
        recipient_user_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Contest submissions were closed ahead of the deadline.
    ContestClosedEarly {
        project_id: Uuid,
        recipient_user_id: Uuid,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },

    /// An early contest closure was reverted — submissions are open again.
    ContestReopened {
        project_id: Uuid,
        recipient_user_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// A signed, time-limited portal link was issued for a client-management
    /// project. The host's sink routes this to the project's client.
    PortalLinkIssued {
        project_id: Uuid,
        url: String,
        expires_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
}

impl MarketEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            MarketEvent::PitchCompleted { .. } => "pitch_completed",
            MarketEvent::PitchClosed { .. } => "pitch_closed",
            MarketEvent::ContestClosedEarly { .. } => "contest_closed_early",
            MarketEvent::ContestReopened { .. } => "contest_reopened",
            MarketEvent::PortalLinkIssued { .. } => "portal_link_issued",
        }
    }

    /// The user this event should be delivered to, when there is one.
    pub fn recipient(&self) -> Option<Uuid> {
        match self {
            MarketEvent::PitchCompleted {
                recipient_user_id, ..
            }
            | MarketEvent::PitchClosed {
                recipient_user_id, ..
            }
            | MarketEvent::ContestClosedEarly {
                recipient_user_id, ..
            }
            | MarketEvent::ContestReopened {
                recipient_user_id, ..
            } => Some(*recipient_user_id),
            MarketEvent::PortalLinkIssued { .. } => None,
        }
    }
}
