// bypass.rs — Payout hold bypass: who may, and what it does.
//
// Authorization is a single capability check — the policy must allow admin
// bypass AND the actor must carry the admin role resolved at the boundary.
// The effect replaces the day-based hold with the minimum-hold-hours floor;
// the original hold is never removed entirely.

use chrono::{DateTime, Duration, Utc};

use pw_domain::Actor;

use crate::error::PayoutError;
use crate::policy::PayoutHoldPolicy;
use crate::schedule::PayoutSchedule;

/// Whether this actor may bypass payout holds under this policy.
pub fn can_bypass(policy: &PayoutHoldPolicy, actor: &Actor) -> bool {
    policy.allow_admin_bypass && actor.is_admin()
}

/// Bypass the hold on a payout schedule.
///
/// Preconditions, first failure wins:
/// - [`can_bypass`] must hold → else `Unauthorized`
/// - when the policy requires a reason, it must be non-blank after
///   trimming → else `ReasonRequired`
///
/// Effect: release date drops to `now + minimum_hold_hours` and the bypass
/// is recorded (reason, admin, timestamp) on the schedule.
pub fn bypass_hold(
    schedule: &mut PayoutSchedule,
    policy: &PayoutHoldPolicy,
    actor: &Actor,
    reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), PayoutError> {
    if !can_bypass(policy, actor) {
        return Err(PayoutError::Unauthorized { actor_id: actor.id });
    }

    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    if policy.require_bypass_reason && reason.is_none() {
        return Err(PayoutError::ReasonRequired);
    }

    schedule.hold_release_date = now + Duration::hours(policy.minimum_hold_hours);
    schedule.hold_bypassed = true;
    schedule.bypass_reason = reason.map(String::from);
    schedule.bypass_admin_id = Some(actor.id);
    schedule.bypassed_at = Some(now);

    tracing::info!(
        schedule_id = %schedule.id,
        admin_id = %actor.id,
        "payout hold bypassed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::WorkflowType;
    use uuid::Uuid;

    fn schedule() -> PayoutSchedule {
        PayoutSchedule::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            WorkflowType::Standard,
            Utc::now() + Duration::days(5),
        )
    }

    #[test]
    fn admin_with_reason_bypasses() {
        let mut s = schedule();
        let mut policy = PayoutHoldPolicy::default();
        policy.minimum_hold_hours = 2;
        let admin = Actor::admin(Uuid::new_v4());
        let now = Utc::now();

        bypass_hold(&mut s, &policy, &admin, Some("fraud review cleared"), now).unwrap();

        assert!(s.hold_bypassed);
        assert_eq!(s.hold_release_date, now + Duration::hours(2));
        assert_eq!(s.bypass_reason.as_deref(), Some("fraud review cleared"));
        assert_eq!(s.bypass_admin_id, Some(admin.id));
        assert_eq!(s.bypassed_at, Some(now));
    }

    #[test]
    fn non_admin_is_unauthorized_even_when_policy_allows_bypass() {
        let mut s = schedule();
        let policy = PayoutHoldPolicy::default();
        assert!(policy.allow_admin_bypass);
        let member = Actor::member(Uuid::new_v4());

        let result = bypass_hold(&mut s, &policy, &member, Some("why not"), Utc::now());

        assert!(matches!(result, Err(PayoutError::Unauthorized { .. })));
        assert!(!s.hold_bypassed);
    }

    #[test]
    fn admin_is_unauthorized_when_policy_disallows_bypass() {
        let mut s = schedule();
        let mut policy = PayoutHoldPolicy::default();
        policy.allow_admin_bypass = false;
        let admin = Actor::admin(Uuid::new_v4());

        let result = bypass_hold(&mut s, &policy, &admin, Some("urgent"), Utc::now());

        assert!(matches!(result, Err(PayoutError::Unauthorized { .. })));
    }

    #[test]
    fn blank_reason_is_rejected_when_required() {
        let mut s = schedule();
        let policy = PayoutHoldPolicy::default();
        let admin = Actor::admin(Uuid::new_v4());

        for reason in [None, Some(""), Some("   ")] {
            let result = bypass_hold(&mut s, &policy, &admin, reason, Utc::now());
            assert!(matches!(result, Err(PayoutError::ReasonRequired)));
            assert!(!s.hold_bypassed);
        }
    }

    #[test]
    fn reason_optional_when_policy_does_not_require_it() {
        let mut s = schedule();
        let mut policy = PayoutHoldPolicy::default();
        policy.require_bypass_reason = false;
        let admin = Actor::admin(Uuid::new_v4());

        bypass_hold(&mut s, &policy, &admin, None, Utc::now()).unwrap();

        assert!(s.hold_bypassed);
        assert!(s.bypass_reason.is_none());
        assert_eq!(s.bypass_admin_id, Some(admin.id));
    }

    #[test]
    fn reason_is_stored_trimmed() {
        let mut s = schedule();
        let policy = PayoutHoldPolicy::default();
        let admin = Actor::admin(Uuid::new_v4());

        bypass_hold(&mut s, &policy, &admin, Some("  expedited  "), Utc::now()).unwrap();

        assert_eq!(s.bypass_reason.as_deref(), Some("expedited"));
    }
}
