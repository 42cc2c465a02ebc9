// complete.rs — The pitch completion workflow.
//
// Completing a pitch is the irreversible center of the marketplace: the
// winner is finalized, a payout is scheduled, and on standard projects
// every competing pitch is closed in the same transaction. The mutation
// set is all-or-nothing; notifications happen after commit and are
// best-effort, so a flaky channel can never abort a financially
// significant state change.

use uuid::Uuid;

use pw_domain::{
    valid_rating, Actor, Direction, PaymentStatus, Pitch, PitchEvent, PitchStatus, ProjectKind,
    SnapshotStatus,
};
use pw_events::MarketEvent;
use pw_payout::PayoutSchedule;

use crate::engine::{workflow_type_for, LifecycleEngine};
use crate::error::LifecycleError;
use crate::store::LifecycleStore;

impl<S: LifecycleStore> LifecycleEngine<S> {
    /// Complete an approved pitch.
    ///
    /// Preconditions, checked inside the transaction in order (first
    /// failure wins, nothing mutates):
    /// 1. the actor owns the project → else `Unauthorized`
    /// 2. the pitch is Approved (and the table carries a forward edge
    ///    Approved → Completed) → else `InvalidState` / `InvalidTransition`
    /// 3. the rating, when present, is in [1, 5] → else `InvalidInput`
    /// 4. the payout is not Processing/Paid → else `AlreadyFinalized`
    ///
    /// Atomic effects: complete the pitch (+feedback/rating/history),
    /// decide the payment status from the project budget, finalize the
    /// pitch's snapshot, cascade-close standard-project siblings (denying
    /// their pending snapshots), schedule the payout under the current
    /// hold policy, and finalize the parent project through the injected
    /// collaborator. Post-commit: best-effort notifications to the closed
    /// siblings' owners, the winner, and — for client-management projects —
    /// the client via a signed portal link.
    pub fn complete_pitch(
        &self,
        pitch_id: Uuid,
        actor: &Actor,
        feedback: Option<String>,
        rating: Option<u8>,
    ) -> Result<Pitch, LifecycleError> {
        let now = self.clock.now();
        let policy = self.policy_store.current_hold_policy();

        let (pitch, project_kind, closed_siblings) = self.store.transaction(|view| {
            let mut pitch = view.pitch(pitch_id).ok_or(LifecycleError::NotFound {
                entity: "pitch",
                id: pitch_id,
            })?;
            let mut project =
                view.project(pitch.project_id)
                    .ok_or(LifecycleError::NotFound {
                        entity: "project",
                        id: pitch.project_id,
                    })?;

            if actor.id != project.owner_user_id {
                return Err(LifecycleError::Unauthorized {
                    actor_id: actor.id,
                    action: "complete a pitch on a project they do not own".to_string(),
                });
            }
            if pitch.status != PitchStatus::Approved {
                return Err(LifecycleError::InvalidState(format!(
                    "pitch must be approved to complete, is {}",
                    pitch.status
                )));
            }
            if self.table.direction(pitch.status, PitchStatus::Completed)
                != Some(Direction::Forward)
            {
                return Err(LifecycleError::InvalidTransition {
                    from: pitch.status,
                    to: PitchStatus::Completed,
                });
            }
            if let Some(rating) = rating {
                if !valid_rating(rating) {
                    return Err(LifecycleError::InvalidInput(format!(
                        "rating must be between 1 and 5, got {rating}"
                    )));
                }
            }
            if pitch.payment_finalized() {
                return Err(LifecycleError::AlreadyFinalized(format!(
                    "payment for pitch {} is already {}",
                    pitch.id, pitch.payment_status
                )));
            }

            let from = pitch.status;
            pitch.status = PitchStatus::Completed;
            pitch.completed_at = Some(now);
            pitch.rating = rating;
            pitch.feedback = feedback.clone();
            pitch.payment_status = if project.budget_cents > 0 {
                PaymentStatus::Pending
            } else {
                PaymentStatus::NotRequired
            };

            if let Some(mut snapshot) = view.snapshot_for_pitch(pitch.id) {
                snapshot.status = SnapshotStatus::Completed;
                view.put_snapshot(snapshot);
            }

            // Standard projects take exactly one winner: everything still in
            // the running is closed here, inside the same transaction, so a
            // concurrent completion path can never race past this read.
            let mut closed_siblings = Vec::new();
            if project.kind == ProjectKind::Standard {
                for mut sibling in view.pitches_for_project(project.id) {
                    if sibling.id == pitch.id {
                        continue;
                    }
                    if matches!(
                        sibling.status,
                        PitchStatus::Completed | PitchStatus::Closed | PitchStatus::Denied
                    ) {
                        continue;
                    }
                    let sibling_from = sibling.status;
                    sibling.status = PitchStatus::Closed;
                    sibling.record(PitchEvent::status_change(
                        actor.id,
                        sibling_from,
                        PitchStatus::Closed,
                        now,
                    ));
                    if let Some(mut snapshot) = view.snapshot_for_pitch(sibling.id) {
                        if snapshot.is_pending() {
                            snapshot.status = SnapshotStatus::Denied;
                            view.put_snapshot(snapshot);
                        }
                    }
                    closed_siblings.push((sibling.id, sibling.owner_user_id));
                    view.put_pitch(sibling);
                }
            }

            if pitch.payment_status == PaymentStatus::Pending {
                let workflow_type = workflow_type_for(project.kind);
                let release = pw_payout::release_date(&policy, workflow_type, now)
                    .map_err(LifecycleError::from)?;
                view.put_schedule(PayoutSchedule::new(
                    pitch.id,
                    project.id,
                    workflow_type,
                    release,
                ));
            }

            self.finalizer
                .complete_project(&mut project)
                .map_err(LifecycleError::Dependency)?;
            view.put_project(project.clone());

            let mut event =
                PitchEvent::status_change(actor.id, from, PitchStatus::Completed, now);
            if let Some(rating) = rating {
                event = event.with_rating(rating);
            }
            if let Some(feedback) = &feedback {
                event = event.with_comment(feedback.clone());
            }
            pitch.record(event);
            view.put_pitch(pitch.clone());

            Ok((pitch, project.kind, closed_siblings))
        })?;

        // Best-effort fan-out — outside the atomic boundary. A failing
        // channel is logged by the dispatcher and affects nothing here.
        for (sibling_id, owner_user_id) in &closed_siblings {
            self.dispatcher.dispatch(&MarketEvent::PitchClosed {
                pitch_id: *sibling_id,
                project_id: pitch.project_id,
                recipient_user_id: *owner_user_id,
                timestamp: now,
            });
        }
        self.dispatcher.dispatch(&MarketEvent::PitchCompleted {
            pitch_id: pitch.id,
            project_id: pitch.project_id,
            recipient_user_id: pitch.owner_user_id,
            rating: pitch.rating,
            timestamp: now,
        });
        if project_kind == ProjectKind::ClientManagement {
            if let Some(portal) = &self.portal {
                let link = portal.issue(pitch.project_id, now);
                self.dispatcher.dispatch(&MarketEvent::PortalLinkIssued {
                    project_id: pitch.project_id,
                    url: link.url,
                    expires_at: link.expires_at,
                    timestamp: now,
                });
            }
        }

        tracing::info!(
            pitch_id = %pitch.id,
            project_id = %pitch.project_id,
            siblings_closed = closed_siblings.len(),
            payment_status = %pitch.payment_status,
            "pitch completed"
        );

        Ok(pitch)
    }
}
