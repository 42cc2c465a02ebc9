// contest.rs — Early contest closure and its reversal.
//
// The same guarded-transition shape as pitch completion, applied to a
// two-state flag on the project: validate the guard set, mutate atomically,
// audit, then fan out best-effort notifications to every entrant.
//
// The 24-hour rule: with less than a day left on the deadline, entrants
// are mid-sprint — closing under them is forbidden; let the clock run out.

use std::collections::BTreeSet;

use chrono::Duration;
use serde_json::json;
use uuid::Uuid;

use pw_audit::{AuditAction, AuditEntry};
use pw_domain::Actor;
use pw_events::MarketEvent;

use crate::engine::LifecycleEngine;
use crate::error::LifecycleError;
use crate::store::LifecycleStore;

impl<S: LifecycleStore> LifecycleEngine<S> {
    /// Close contest submissions ahead of the deadline.
    ///
    /// Preconditions: contest kind; the actor owns the project; at least
    /// one entry exists; submissions are not already closed (early or via
    /// project completion); the deadline, if set, is more than 24 hours
    /// away.
    pub fn close_contest_early(
        &self,
        project_id: Uuid,
        actor: &Actor,
        reason: Option<String>,
    ) -> Result<(), LifecycleError> {
        let now = self.clock.now();

        let (entrants, entry_count) = self.store.transaction(|view| {
            let mut project = view.project(project_id).ok_or(LifecycleError::NotFound {
                entity: "project",
                id: project_id,
            })?;

            if !project.is_contest() {
                return Err(LifecycleError::InvalidState(
                    "only contest projects can close submissions early".to_string(),
                ));
            }
            if actor.id != project.owner_user_id {
                return Err(LifecycleError::Unauthorized {
                    actor_id: actor.id,
                    action: "close submissions on a contest they do not own".to_string(),
                });
            }
            let entries = view.pitches_for_project(project_id);
            if entries.is_empty() {
                return Err(LifecycleError::InvalidState(
                    "a contest with no entries cannot close early".to_string(),
                ));
            }
            if project.was_closed_early() || !project.is_open() {
                return Err(LifecycleError::InvalidState(
                    "submissions are already closed".to_string(),
                ));
            }
            if let Some(deadline) = project.submission_deadline {
                if deadline <= now + Duration::hours(24) {
                    return Err(LifecycleError::InvalidState(
                        "submission deadline is less than 24 hours away".to_string(),
                    ));
                }
            }

            project.submissions_closed_early_at = Some(now);
            project.submissions_closed_early_by = Some(actor.id);
            project.early_closure_reason = reason.clone();
            view.put_project(project);

            let entrants: BTreeSet<Uuid> =
                entries.iter().map(|entry| entry.owner_user_id).collect();
            Ok((entrants, entries.len()))
        })?;

        self.audit
            .record(
                AuditEntry::new(actor.id, AuditAction::EarlyClosure, project_id, now)
                    .with_metadata(json!({
                        "entry_count": entry_count,
                        "reason": reason.clone(),
                    })),
            )
            .map_err(|e| LifecycleError::Dependency(anyhow::Error::new(e)))?;

        for entrant in &entrants {
            self.dispatcher.dispatch(&MarketEvent::ContestClosedEarly {
                project_id,
                recipient_user_id: *entrant,
                reason: reason.clone(),
                timestamp: now,
            });
        }

        tracing::info!(
            project_id = %project_id,
            entry_count,
            "contest submissions closed early"
        );

        Ok(())
    }

    /// Reverse an early closure — submissions open again.
    ///
    /// Preconditions: contest kind; the actor owns the project; it was
    /// closed early; judging is not finalized; the original deadline, if
    /// set, has not passed.
    pub fn reopen_contest(&self, project_id: Uuid, actor: &Actor) -> Result<(), LifecycleError> {
        let now = self.clock.now();

        let entrants = self.store.transaction(|view| {
            let mut project = view.project(project_id).ok_or(LifecycleError::NotFound {
                entity: "project",
                id: project_id,
            })?;

            if !project.is_contest() {
                return Err(LifecycleError::InvalidState(
                    "only contest projects can reopen submissions".to_string(),
                ));
            }
            if actor.id != project.owner_user_id {
                return Err(LifecycleError::Unauthorized {
                    actor_id: actor.id,
                    action: "reopen submissions on a contest they do not own".to_string(),
                });
            }
            if !project.was_closed_early() {
                return Err(LifecycleError::InvalidState(
                    "submissions were not closed early".to_string(),
                ));
            }
            if project.judging_finalized {
                return Err(LifecycleError::InvalidState(
                    "judging is finalized; submissions cannot reopen".to_string(),
                ));
            }
            if let Some(deadline) = project.submission_deadline {
                if deadline <= now {
                    return Err(LifecycleError::InvalidState(
                        "the original submission deadline has passed".to_string(),
                    ));
                }
            }

            project.submissions_closed_early_at = None;
            project.submissions_closed_early_by = None;
            project.early_closure_reason = None;
            view.put_project(project);

            let entrants: BTreeSet<Uuid> = view
                .pitches_for_project(project_id)
                .iter()
                .map(|entry| entry.owner_user_id)
                .collect();
            Ok(entrants)
        })?;

        self.audit
            .record(AuditEntry::new(
                actor.id,
                AuditAction::SubmissionsReopened,
                project_id,
                now,
            ))
            .map_err(|e| LifecycleError::Dependency(anyhow::Error::new(e)))?;

        for entrant in &entrants {
            self.dispatcher.dispatch(&MarketEvent::ContestReopened {
                project_id,
                recipient_user_id: *entrant,
                timestamp: now,
            });
        }

        tracing::info!(project_id = %project_id, "contest submissions reopened");

        Ok(())
    }
}
