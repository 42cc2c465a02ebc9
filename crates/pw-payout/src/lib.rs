//! # pw-payout
//!
//! Payout hold policy and release date calculation for the Pitchworks
//! lifecycle engine.
//!
//! When a pitch completes with a payout owed, the funds are held before
//! release. How long is policy: a per-workflow-type hold-day table, an
//! optional business-days-only rule, and a minimum-hold-hours floor that
//! always applies when day-based holds are off. Admins can bypass a hold,
//! subject to the policy's own rules about who may and what they must say.
//!
//! ## Key components
//!
//! - [`PayoutHoldPolicy`] — the injected policy value (YAML-loadable)
//! - [`WorkflowType`] — which hold-day table row applies
//! - [`release_date`] — the pure hold/release date calculator
//! - [`PayoutSchedule`] — one scheduled payout and its bypass record
//! - [`can_bypass`] / [`bypass_hold`] — bypass authorization and effect
//! - [`PolicyStore`] — collaborator trait handing out the current policy

pub mod bypass;
pub mod error;
pub mod hold;
pub mod policy;
pub mod schedule;

pub use bypass::{bypass_hold, can_bypass};
pub use error::PayoutError;
pub use hold::release_date;
pub use policy::{PayoutHoldPolicy, PolicyStore, StaticPolicyStore, WorkflowType};
pub use schedule::PayoutSchedule;
