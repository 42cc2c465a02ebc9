// engine.rs — The LifecycleEngine facade.
//
// One struct owns the store and every collaborator, and exposes the public
// operations. Collaborators default to the in-repo implementations so an
// engine over a MemoryStore works out of the box; hosts swap in their own
// with the builder-style `with_*` methods.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use pw_audit::{AuditAction, AuditEntry, AuditRecorder, MemoryRecorder};
use pw_domain::{Actor, ProjectKind, TransitionTable};
use pw_events::{EventDispatcher, PortalLinkIssuer};
use pw_payout::{PayoutHoldPolicy, PayoutSchedule, PolicyStore, StaticPolicyStore, WorkflowType};

use crate::clock::{Clock, SystemClock};
use crate::error::LifecycleError;
use crate::finalizer::{MarkCompletedFinalizer, ProjectFinalizer};
use crate::store::LifecycleStore;

/// Which hold-day table row a project kind's payouts use.
pub fn workflow_type_for(kind: ProjectKind) -> WorkflowType {
    match kind {
        ProjectKind::Standard => WorkflowType::Standard,
        ProjectKind::Contest => WorkflowType::Contest,
        ProjectKind::ClientManagement => WorkflowType::ClientManagement,
    }
}

/// The lifecycle engine — the single entry point for every guarded
/// state transition in the marketplace.
pub struct LifecycleEngine<S> {
    pub(crate) store: S,
    pub(crate) table: TransitionTable,
    pub(crate) finalizer: Box<dyn ProjectFinalizer>,
    pub(crate) dispatcher: EventDispatcher,
    pub(crate) audit: Box<dyn AuditRecorder>,
    pub(crate) policy_store: Box<dyn PolicyStore>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) portal: Option<PortalLinkIssuer>,
}

impl<S: LifecycleStore> LifecycleEngine<S> {
    /// Create an engine over a store with default collaborators: the
    /// standard transition table, the mark-completed finalizer, an empty
    /// dispatcher, an in-memory audit recorder, the shipped hold policy,
    /// the system clock, and no portal issuer.
    pub fn new(store: S) -> Self {
        Self {
            store,
            table: TransitionTable::standard(),
            finalizer: Box::new(MarkCompletedFinalizer),
            dispatcher: EventDispatcher::new(),
            audit: Box::new(MemoryRecorder::new()),
            policy_store: Box::new(StaticPolicyStore::new(PayoutHoldPolicy::default())),
            clock: Box::new(SystemClock),
            portal: None,
        }
    }

    pub fn with_table(mut self, table: TransitionTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_finalizer(mut self, finalizer: Box<dyn ProjectFinalizer>) -> Self {
        self.finalizer = finalizer;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_audit(mut self, audit: Box<dyn AuditRecorder>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_policy_store(mut self, policy_store: Box<dyn PolicyStore>) -> Self {
        self.policy_store = policy_store;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_portal(mut self, portal: PortalLinkIssuer) -> Self {
        self.portal = Some(portal);
        self
    }

    /// The underlying store, for host-side reads and seeding.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// When a payout scheduled right now for this workflow type would
    /// become releasable under the current policy.
    pub fn hold_release_date(
        &self,
        workflow_type: WorkflowType,
    ) -> Result<DateTime<Utc>, LifecycleError> {
        let policy = self.policy_store.current_hold_policy();
        pw_payout::release_date(&policy, workflow_type, self.clock.now())
            .map_err(LifecycleError::from)
    }

    /// Bypass the hold on a payout schedule.
    ///
    /// Authorization and the reason requirement are policy
    /// (see `pw_payout::bypass_hold`); on success the updated schedule is
    /// stored atomically and, when the policy asks for it, an audit entry
    /// is recorded.
    pub fn bypass_hold(
        &self,
        payout_id: Uuid,
        actor: &Actor,
        reason: Option<&str>,
    ) -> Result<PayoutSchedule, LifecycleError> {
        let now = self.clock.now();
        let policy = self.policy_store.current_hold_policy();

        let schedule = self.store.transaction(|view| {
            let mut schedule = view.schedule(payout_id).ok_or(LifecycleError::NotFound {
                entity: "payout schedule",
                id: payout_id,
            })?;
            pw_payout::bypass_hold(&mut schedule, &policy, actor, reason, now)?;
            view.put_schedule(schedule.clone());
            Ok(schedule)
        })?;

        if policy.audit_bypass {
            self.audit
                .record(
                    AuditEntry::new(actor.id, AuditAction::HoldBypass, schedule.id, now)
                        .with_metadata(json!({
                            "pitch_id": schedule.pitch_id,
                            "reason": schedule.bypass_reason.clone(),
                        })),
                )
                .map_err(|e| LifecycleError::Dependency(anyhow::Error::new(e)))?;
        }

        Ok(schedule)
    }
}
