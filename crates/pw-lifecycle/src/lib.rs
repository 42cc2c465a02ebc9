//! # pw-lifecycle
//!
//! The guarded workflows of the Pitchworks marketplace: pitch completion
//! with its sibling cascade, generic table-driven status changes, early
//! contest closure and reopening, and payout hold bypass.
//!
//! Every operation runs its mutation set inside one store transaction —
//! all-or-nothing — and hands notifications to the dispatcher only after
//! commit. Precondition failures are typed ([`LifecycleError`]) and leave
//! no trace; a collaborator failure rolls the transaction back and
//! surfaces as [`LifecycleError::Dependency`].
//!
//! ## Key components
//!
//! - [`LifecycleEngine`] — the facade owning the store and collaborators
//! - [`LifecycleStore`] / [`MemoryStore`] — the transactional store seam
//! - [`Clock`] / [`SystemClock`] / [`FixedClock`] — injectable time
//! - [`ProjectFinalizer`] — project-completion collaborator (idempotent)
//! - [`LifecycleError`] — the failure taxonomy
//!
//! ```
//! use pw_domain::{Actor, Pitch, PitchStatus, Project, ProjectKind};
//! use pw_lifecycle::{LifecycleEngine, MemoryStore};
//! use uuid::Uuid;
//!
//! let store = MemoryStore::new();
//! let project = Project::new(Uuid::new_v4(), ProjectKind::Standard, 50_000);
//! let owner = Actor::member(project.owner_user_id);
//! let mut pitch = Pitch::new(project.id, Uuid::new_v4());
//! pitch.status = PitchStatus::Approved;
//! let pitch_id = pitch.id;
//! store.insert_project(project).unwrap();
//! store.insert_pitch(pitch).unwrap();
//!
//! let engine = LifecycleEngine::new(store);
//! let completed = engine
//!     .complete_pitch(pitch_id, &owner, Some("great work".into()), Some(5))
//!     .unwrap();
//! assert_eq!(completed.status, PitchStatus::Completed);
//! ```

pub mod clock;
mod complete;
mod contest;
pub mod engine;
pub mod error;
pub mod finalizer;
mod status;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{workflow_type_for, LifecycleEngine};
pub use error::LifecycleError;
pub use finalizer::{MarkCompletedFinalizer, ProjectFinalizer};
pub use store::{LifecycleStore, MemoryStore, StoreView};
