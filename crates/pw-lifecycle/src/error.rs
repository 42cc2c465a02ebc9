// error.rs — The failure taxonomy for lifecycle operations.
//
// Precondition failures (everything except Dependency) are returned before
// any mutation is kept: callers can map each to a distinct user-facing
// message and retry after fixing their input. Dependency wraps an external
// collaborator's failure after the transaction rolled back.

use thiserror::Error;
use uuid::Uuid;

use pw_domain::PitchStatus;
use pw_payout::PayoutError;

/// Errors returned by the lifecycle workflows.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The actor lacks the rights for this operation.
    #[error("actor {actor_id} is not authorized to {action}")]
    Unauthorized { actor_id: Uuid, action: String },

    /// A precondition on current status or flags failed.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A malformed argument (out-of-range rating, blank required reason).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The idempotency guard tripped — this work was already finalized.
    #[error("already finalized: {0}")]
    AlreadyFinalized(String),

    /// The transition table has no edge between these statuses.
    #[error("no legal transition from {from} to {to}")]
    InvalidTransition { from: PitchStatus, to: PitchStatus },

    /// The referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// An external collaborator failed; the transaction was rolled back.
    #[error("dependency failure: {0}")]
    Dependency(anyhow::Error),
}

impl From<anyhow::Error> for LifecycleError {
    fn from(err: anyhow::Error) -> Self {
        LifecycleError::Dependency(err)
    }
}

impl From<PayoutError> for LifecycleError {
    fn from(err: PayoutError) -> Self {
        match err {
            PayoutError::Unauthorized { actor_id } => LifecycleError::Unauthorized {
                actor_id,
                action: "bypass a payout hold".to_string(),
            },
            PayoutError::ReasonRequired => {
                LifecycleError::InvalidInput("a bypass reason is required by policy".to_string())
            }
            other => LifecycleError::Dependency(anyhow::Error::new(other)),
        }
    }
}
