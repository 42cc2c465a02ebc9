//! # pw-domain
//!
//! Data model and status transition rules for the Pitchworks lifecycle engine.
//!
//! A [`Pitch`] is one unit of submitted work attached to a [`Project`]. Its
//! status moves through a directed graph of legal transitions described by a
//! [`TransitionTable`]; the table is configuration, not code, so hosts can
//! ship their own edge set. Everything in this crate is plain data plus pure
//! functions — the workflows that mutate state live in `pw-lifecycle`.
//!
//! ## Key components
//!
//! - [`Pitch`] / [`PitchStatus`] / [`PaymentStatus`] — the submission record
//! - [`PitchEvent`] — immutable history entries appended on status changes
//! - [`Project`] / [`ProjectKind`] — the owning project and its contest fields
//! - [`ReviewSnapshot`] — frozen deliverable record attached to a pitch
//! - [`Actor`] — caller identity with the admin capability resolved up front
//! - [`TransitionTable`] / [`Direction`] — the forward/backward edge sets and
//!   the pure direction lookup

pub mod actor;
pub mod pitch;
pub mod project;
pub mod snapshot;
pub mod transition;

pub use actor::{Actor, ActorRole};
pub use pitch::{valid_rating, PaymentStatus, Pitch, PitchEvent, PitchEventKind, PitchStatus};
pub use project::{Project, ProjectKind, ProjectStatus};
pub use snapshot::{ReviewSnapshot, SnapshotStatus};
pub use transition::{Direction, TransitionTable, TransitionTableBuilder};
