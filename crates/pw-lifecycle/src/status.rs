// status.rs — The generic status-change operation.
//
// Everything that is not completion moves through here: review verdicts,
// revision rounds, withdrawals, and admin reverts. The transition table
// decides whether a move exists and in which direction; authorization is
// layered on top of the direction — forward moves belong to the people in
// the deal, backward moves are admin-only.

use uuid::Uuid;

use pw_domain::{Actor, Direction, Pitch, PitchEvent, PitchStatus};

use crate::engine::LifecycleEngine;
use crate::error::LifecycleError;
use crate::store::LifecycleStore;

impl<S: LifecycleStore> LifecycleEngine<S> {
    /// Move a pitch to `target` along a table edge.
    ///
    /// - No edge → `InvalidTransition`.
    /// - Forward moves: project owner, pitch owner, or an admin.
    /// - Backward moves (reverting a verdict): admin only.
    /// - Completion is not reachable here — it carries payout side effects
    ///   and goes through [`complete_pitch`](Self::complete_pitch).
    /// - A pitch whose payment is underway or settled is immutable.
    pub fn change_status(
        &self,
        pitch_id: Uuid,
        actor: &Actor,
        target: PitchStatus,
    ) -> Result<Pitch, LifecycleError> {
        let now = self.clock.now();

        self.store.transaction(|view| {
            let mut pitch = view.pitch(pitch_id).ok_or(LifecycleError::NotFound {
                entity: "pitch",
                id: pitch_id,
            })?;
            let project = view
                .project(pitch.project_id)
                .ok_or(LifecycleError::NotFound {
                    entity: "project",
                    id: pitch.project_id,
                })?;

            if target == PitchStatus::Completed {
                return Err(LifecycleError::InvalidInput(
                    "completion has its own workflow; use complete_pitch".to_string(),
                ));
            }
            if pitch.payment_finalized() {
                return Err(LifecycleError::AlreadyFinalized(format!(
                    "payment for pitch {} is already {}",
                    pitch.id, pitch.payment_status
                )));
            }

            let direction = self
                .table
                .direction(pitch.status, target)
                .ok_or(LifecycleError::InvalidTransition {
                    from: pitch.status,
                    to: target,
                })?;

            match direction {
                Direction::Forward => {
                    let in_the_deal = actor.id == project.owner_user_id
                        || actor.id == pitch.owner_user_id;
                    if !in_the_deal && !actor.is_admin() {
                        return Err(LifecycleError::Unauthorized {
                            actor_id: actor.id,
                            action: format!("move pitch {} to {}", pitch.id, target),
                        });
                    }
                }
                Direction::Backward => {
                    if !actor.is_admin() {
                        return Err(LifecycleError::Unauthorized {
                            actor_id: actor.id,
                            action: format!(
                                "revert pitch {} to {} (admin only)",
                                pitch.id, target
                            ),
                        });
                    }
                }
            }

            let from = pitch.status;
            pitch.status = target;
            pitch.record(PitchEvent::status_change(actor.id, from, target, now));
            view.put_pitch(pitch.clone());

            tracing::debug!(
                pitch_id = %pitch.id,
                from = %from,
                to = %target,
                "pitch status changed"
            );

            Ok(pitch)
        })
    }
}
