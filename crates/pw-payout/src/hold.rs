// hold.rs — The hold/release date calculator.
//
// Pure function of (policy, workflow type, now). Day counting is inclusive
// of added days only: the start date itself never counts, whatever its
// weekday. Weekend detection is ISO — Saturday and Sunday are skipped
// regardless of locale.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

use crate::error::PayoutError;
use crate::policy::{PayoutHoldPolicy, WorkflowType};

/// Compute when a payout becomes releasable.
///
/// - Disabled policy or a zero hold-day row: `now + minimum_hold_hours`.
/// - Otherwise: walk forward one calendar day at a time; a day counts
///   toward the hold only when it is Monday–Friday if `business_days_only`
///   is set. Once enough days have counted, pin the result to the policy's
///   processing time of day.
pub fn release_date(
    policy: &PayoutHoldPolicy,
    workflow_type: WorkflowType,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, PayoutError> {
    policy.validate()?;

    if !policy.enabled {
        return Ok(now + Duration::hours(policy.minimum_hold_hours));
    }

    let hold_days = policy.hold_days_for(workflow_type);
    if hold_days == 0 {
        return Ok(now + Duration::hours(policy.minimum_hold_hours));
    }

    let mut date = now.date_naive();
    let mut counted = 0u32;
    while counted < hold_days {
        date = date.succ_opt().ok_or(PayoutError::DateOverflow)?;
        if policy.business_days_only
            && matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
        {
            continue;
        }
        counted += 1;
    }

    Ok(DateTime::from_naive_utc_and_offset(
        date.and_time(policy.processing_time_of_day),
        Utc,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn policy(business_days_only: bool, hold_days: u32) -> PayoutHoldPolicy {
        let mut policy = PayoutHoldPolicy::default();
        policy.business_days_only = business_days_only;
        policy.processing_time_of_day = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        policy.hold_days = [(WorkflowType::Standard, hold_days)].into_iter().collect();
        policy
    }

    /// Monday 2025-06-02, 10:00 UTC.
    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    /// Friday 2025-06-06, 10:00 UTC.
    fn friday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 6, 10, 0, 0).unwrap()
    }

    #[test]
    fn calendar_days_land_on_thursday() {
        // holdDays=3 from Monday, calendar counting: Tue, Wed, Thu.
        let result = release_date(&policy(false, 3), WorkflowType::Standard, monday()).unwrap();
        assert_eq!(
            result,
            Utc.with_ymd_and_hms(2025, 6, 5, 9, 0, 0).unwrap()
        );
        assert_eq!(result.weekday(), Weekday::Thu);
    }

    #[test]
    fn business_days_skip_the_weekend() {
        // holdDays=3 from Friday: Sat/Sun skipped, Mon+Tue+Wed counted.
        let result = release_date(&policy(true, 3), WorkflowType::Standard, friday()).unwrap();
        assert_eq!(
            result,
            Utc.with_ymd_and_hms(2025, 6, 11, 9, 0, 0).unwrap()
        );
        assert_eq!(result.weekday(), Weekday::Wed);
    }

    #[test]
    fn zero_hold_days_fall_back_to_the_floor() {
        let mut p = policy(false, 0);
        p.minimum_hold_hours = 2;
        let now = monday();
        let result = release_date(&p, WorkflowType::Standard, now).unwrap();
        assert_eq!(result, now + Duration::hours(2));

        // businessDaysOnly makes no difference at zero days.
        let mut p = policy(true, 0);
        p.minimum_hold_hours = 2;
        let result = release_date(&p, WorkflowType::Standard, now).unwrap();
        assert_eq!(result, now + Duration::hours(2));
    }

    #[test]
    fn disabled_policy_always_uses_the_floor() {
        let mut p = policy(true, 5);
        p.enabled = false;
        p.minimum_hold_hours = 6;
        let now = friday();
        let result = release_date(&p, WorkflowType::Standard, now).unwrap();
        assert_eq!(result, now + Duration::hours(6));
    }

    #[test]
    fn workflow_type_without_a_row_uses_the_floor() {
        let mut p = policy(true, 5);
        p.minimum_hold_hours = 4;
        let now = monday();
        // Contest has no row in this table.
        let result = release_date(&p, WorkflowType::Contest, now).unwrap();
        assert_eq!(result, now + Duration::hours(4));
    }

    #[test]
    fn start_date_never_counts() {
        // One business day from Monday 10:00 is Tuesday, not Monday itself.
        let result = release_date(&policy(true, 1), WorkflowType::Standard, monday()).unwrap();
        assert_eq!(result.weekday(), Weekday::Tue);
    }

    #[test]
    fn saturday_start_counts_from_monday() {
        // Saturday 2025-06-07: one business day later is Monday.
        let saturday = Utc.with_ymd_and_hms(2025, 6, 7, 12, 0, 0).unwrap();
        let result = release_date(&policy(true, 1), WorkflowType::Standard, saturday).unwrap();
        assert_eq!(
            result,
            Utc.with_ymd_and_hms(2025, 6, 9, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn result_lands_on_processing_time_of_day() {
        let mut p = policy(false, 2);
        p.processing_time_of_day = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let result = release_date(&p, WorkflowType::Standard, monday()).unwrap();
        assert_eq!(
            result,
            Utc.with_ymd_and_hms(2025, 6, 4, 14, 30, 0).unwrap()
        );
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let mut p = policy(false, 3);
        p.minimum_hold_hours = -1;
        assert!(matches!(
            release_date(&p, WorkflowType::Standard, monday()),
            Err(PayoutError::InvalidPolicy(_))
        ));
    }
}
