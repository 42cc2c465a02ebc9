// store.rs — The transactional store seam.
//
// Persistence itself is a host concern; the engine only needs two things
// from it: record access, and an atomicity boundary. `LifecycleStore`
// provides both through a closure-based transaction — everything the
// closure reads and writes happens against one consistent view, and a
// returned error discards every write. Sibling reads during the completion
// cascade therefore can never observe (or clobber) a concurrent
// completion: transactions on the same store serialize.
//
// `MemoryStore` is the reference implementation and the test harness.
// Hosts backing the engine with a database implement the same contract
// with a real transaction.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use uuid::Uuid;

use pw_domain::{Pitch, Project, ReviewSnapshot};
use pw_payout::PayoutSchedule;

use crate::error::LifecycleError;

/// Record access inside one transaction.
pub trait StoreView {
    fn pitch(&self, id: Uuid) -> Option<Pitch>;
    fn project(&self, id: Uuid) -> Option<Project>;
    /// Every pitch on a project, in creation order.
    fn pitches_for_project(&self, project_id: Uuid) -> Vec<Pitch>;
    fn snapshot_for_pitch(&self, pitch_id: Uuid) -> Option<ReviewSnapshot>;
    fn schedule(&self, id: Uuid) -> Option<PayoutSchedule>;
    /// Every payout schedule created for a pitch.
    fn schedules_for_pitch(&self, pitch_id: Uuid) -> Vec<PayoutSchedule>;

    fn put_pitch(&mut self, pitch: Pitch);
    fn put_project(&mut self, project: Project);
    fn put_snapshot(&mut self, snapshot: ReviewSnapshot);
    fn put_schedule(&mut self, schedule: PayoutSchedule);
}

/// A store that can run closures transactionally.
pub trait LifecycleStore: Send {
    /// Run `f` against a consistent view. All writes are kept only when `f`
    /// returns Ok; an Err discards every write and is returned unchanged.
    fn transaction<T, F>(&self, f: F) -> Result<T, LifecycleError>
    where
        F: FnOnce(&mut dyn StoreView) -> Result<T, LifecycleError>;
}

#[derive(Default, Clone)]
struct State {
    pitches: HashMap<Uuid, Pitch>,
    projects: HashMap<Uuid, Project>,
    snapshots: HashMap<Uuid, ReviewSnapshot>,
    schedules: HashMap<Uuid, PayoutSchedule>,
}

impl StoreView for State {
    fn pitch(&self, id: Uuid) -> Option<Pitch> {
        self.pitches.get(&id).cloned()
    }

    fn project(&self, id: Uuid) -> Option<Project> {
        self.projects.get(&id).cloned()
    }

    fn pitches_for_project(&self, project_id: Uuid) -> Vec<Pitch> {
        let mut pitches: Vec<Pitch> = self
            .pitches
            .values()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        pitches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        pitches
    }

    fn snapshot_for_pitch(&self, pitch_id: Uuid) -> Option<ReviewSnapshot> {
        self.snapshots
            .values()
            .filter(|s| s.pitch_id == pitch_id)
            .max_by_key(|s| s.created_at)
            .cloned()
    }

    fn schedule(&self, id: Uuid) -> Option<PayoutSchedule> {
        self.schedules.get(&id).cloned()
    }

    fn schedules_for_pitch(&self, pitch_id: Uuid) -> Vec<PayoutSchedule> {
        let mut schedules: Vec<PayoutSchedule> = self
            .schedules
            .values()
            .filter(|s| s.pitch_id == pitch_id)
            .cloned()
            .collect();
        schedules.sort_by_key(|s| s.id);
        schedules
    }

    fn put_pitch(&mut self, pitch: Pitch) {
        self.pitches.insert(pitch.id, pitch);
    }

    fn put_project(&mut self, project: Project) {
        self.projects.insert(project.id, project);
    }

    fn put_snapshot(&mut self, snapshot: ReviewSnapshot) {
        self.snapshots.insert(snapshot.id, snapshot);
    }

    fn put_schedule(&mut self, schedule: PayoutSchedule) {
        self.schedules.insert(schedule.id, schedule);
    }
}

/// In-memory store with snapshot-rollback transactions.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record outside any workflow (test/bootstrap convenience).
    pub fn insert_pitch(&self, pitch: Pitch) -> Result<(), LifecycleError> {
        self.transaction(|view| {
            view.put_pitch(pitch);
            Ok(())
        })
    }

    pub fn insert_project(&self, project: Project) -> Result<(), LifecycleError> {
        self.transaction(|view| {
            view.put_project(project);
            Ok(())
        })
    }

    pub fn insert_snapshot(&self, snapshot: ReviewSnapshot) -> Result<(), LifecycleError> {
        self.transaction(|view| {
            view.put_snapshot(snapshot);
            Ok(())
        })
    }

    pub fn insert_schedule(&self, schedule: PayoutSchedule) -> Result<(), LifecycleError> {
        self.transaction(|view| {
            view.put_schedule(schedule);
            Ok(())
        })
    }

    /// Read a record outside any workflow.
    pub fn get_pitch(&self, id: Uuid) -> Result<Option<Pitch>, LifecycleError> {
        self.transaction(|view| Ok(view.pitch(id)))
    }

    pub fn get_project(&self, id: Uuid) -> Result<Option<Project>, LifecycleError> {
        self.transaction(|view| Ok(view.project(id)))
    }

    pub fn get_pitches_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<Pitch>, LifecycleError> {
        self.transaction(|view| Ok(view.pitches_for_project(project_id)))
    }

    pub fn get_snapshot_for_pitch(
        &self,
        pitch_id: Uuid,
    ) -> Result<Option<ReviewSnapshot>, LifecycleError> {
        self.transaction(|view| Ok(view.snapshot_for_pitch(pitch_id)))
    }

    pub fn get_schedules_for_pitch(
        &self,
        pitch_id: Uuid,
    ) -> Result<Vec<PayoutSchedule>, LifecycleError> {
        self.transaction(|view| Ok(view.schedules_for_pitch(pitch_id)))
    }
}

impl LifecycleStore for MemoryStore {
    fn transaction<T, F>(&self, f: F) -> Result<T, LifecycleError>
    where
        F: FnOnce(&mut dyn StoreView) -> Result<T, LifecycleError>,
    {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| LifecycleError::Dependency(anyhow!("store lock poisoned")))?;
        let checkpoint = guard.clone();
        match f(&mut *guard) {
            Ok(value) => Ok(value),
            Err(err) => {
                *guard = checkpoint;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_domain::{PitchStatus, ProjectKind};

    #[test]
    fn writes_survive_a_committed_transaction() {
        let store = MemoryStore::new();
        let pitch = Pitch::new(Uuid::new_v4(), Uuid::new_v4());
        let id = pitch.id;

        store.insert_pitch(pitch).unwrap();

        let found = store.get_pitch(id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.status, PitchStatus::Pending);
    }

    #[test]
    fn writes_are_discarded_when_the_transaction_errors() {
        let store = MemoryStore::new();
        let pitch = Pitch::new(Uuid::new_v4(), Uuid::new_v4());
        let id = pitch.id;
        store.insert_pitch(pitch).unwrap();

        let result: Result<(), LifecycleError> = store.transaction(|view| {
            let mut p = view.pitch(id).unwrap();
            p.status = PitchStatus::Closed;
            view.put_pitch(p);
            Err(LifecycleError::InvalidState("abort after write".to_string()))
        });

        assert!(result.is_err());
        // The write inside the failed transaction left no trace.
        let found = store.get_pitch(id).unwrap().unwrap();
        assert_eq!(found.status, PitchStatus::Pending);
    }

    #[test]
    fn pitches_for_project_filters_and_orders() {
        let store = MemoryStore::new();
        let project = Project::new(Uuid::new_v4(), ProjectKind::Standard, 0);
        let project_id = project.id;
        store.insert_project(project).unwrap();

        for _ in 0..3 {
            store
                .insert_pitch(Pitch::new(project_id, Uuid::new_v4()))
                .unwrap();
        }
        // A pitch on some other project must not appear.
        store
            .insert_pitch(Pitch::new(Uuid::new_v4(), Uuid::new_v4()))
            .unwrap();

        let pitches = store.get_pitches_for_project(project_id).unwrap();
        assert_eq!(pitches.len(), 3);
        assert!(pitches.iter().all(|p| p.project_id == project_id));
    }

    #[test]
    fn snapshot_lookup_returns_the_latest_for_a_pitch() {
        let store = MemoryStore::new();
        let pitch_id = Uuid::new_v4();
        let older = ReviewSnapshot::pending(pitch_id);
        let mut newer = ReviewSnapshot::pending(pitch_id);
        newer.created_at = older.created_at + chrono::Duration::minutes(1);
        let newer_id = newer.id;

        store.insert_snapshot(older).unwrap();
        store.insert_snapshot(newer).unwrap();

        let found = store.get_snapshot_for_pitch(pitch_id).unwrap().unwrap();
        assert_eq!(found.id, newer_id);
    }
}
