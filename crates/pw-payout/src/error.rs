// error.rs — Error types for the payout subsystem.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during payout hold operations.
#[derive(Debug, Error)]
pub enum PayoutError {
    /// The actor may not bypass payout holds.
    #[error("actor {actor_id} is not authorized to bypass payout holds")]
    Unauthorized { actor_id: Uuid },

    /// Policy requires a bypass reason and none (or a blank one) was given.
    #[error("a bypass reason is required by policy")]
    ReasonRequired,

    /// The policy itself is malformed.
    #[error("invalid hold policy: {0}")]
    InvalidPolicy(String),

    /// Walking the calendar ran off the end of representable dates.
    #[error("hold release date arithmetic overflowed the calendar")]
    DateOverflow,

    /// Failed to read a policy file.
    #[error("failed to read policy file at {path}: {source}")]
    PolicyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a policy file.
    #[error("failed to parse policy file: {0}")]
    PolicyParse(#[from] serde_yaml::Error),
}
