// policy.rs — The payout hold policy.
//
// The policy is an explicitly injected value, not a global: workflows ask a
// PolicyStore for the current policy at call time, and the host owns the
// cache/refresh lifecycle. Stored as YAML when file-backed.
//
// ```yaml
// enabled: true
// minimum_hold_hours: 24
// business_days_only: true
// processing_time_of_day: "09:00:00"
// allow_admin_bypass: true
// require_bypass_reason: true
// audit_bypass: true
// hold_days:
//   standard: 5
//   contest: 7
//   client_management: 3
// ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PayoutError;

/// Which hold-day table row applies to a payout. Mirrors the project kind
/// that produced it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    Standard,
    Contest,
    ClientManagement,
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowType::Standard => write!(f, "standard"),
            WorkflowType::Contest => write!(f, "contest"),
            WorkflowType::ClientManagement => write!(f, "client_management"),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_minimum_hold_hours() -> i64 {
    24
}

fn default_business_days_only() -> bool {
    true
}

fn default_processing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00:00 is a valid time of day")
}

fn default_allow_admin_bypass() -> bool {
    true
}

fn default_require_bypass_reason() -> bool {
    true
}

fn default_audit_bypass() -> bool {
    true
}

fn default_hold_days() -> BTreeMap<WorkflowType, u32> {
    BTreeMap::from([
        (WorkflowType::Standard, 5),
        (WorkflowType::Contest, 7),
        (WorkflowType::ClientManagement, 3),
    ])
}

/// The payout hold policy — singleton, versionless, read-mostly.
///
/// When `enabled` is false the hold-day table is ignored entirely and only
/// the minimum-hold-hours floor applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutHoldPolicy {
    /// Master switch for day-based holds.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Floor applied whenever day-based holds don't: disabled policy or a
    /// zero hold-day row. Must be non-negative.
    #[serde(default = "default_minimum_hold_hours")]
    pub minimum_hold_hours: i64,

    /// Count only Monday–Friday toward the hold days.
    #[serde(default = "default_business_days_only")]
    pub business_days_only: bool,

    /// Time of day the release lands on when day-based holds apply.
    #[serde(default = "default_processing_time")]
    pub processing_time_of_day: NaiveTime,

    /// Whether admins may bypass holds at all.
    #[serde(default = "default_allow_admin_bypass")]
    pub allow_admin_bypass: bool,

    /// Whether a bypass must carry a non-blank reason.
    #[serde(default = "default_require_bypass_reason")]
    pub require_bypass_reason: bool,

    /// Whether bypasses get an audit log entry.
    #[serde(default = "default_audit_bypass")]
    pub audit_bypass: bool,

    /// Hold days per workflow type. Missing rows mean zero days (floor
    /// applies).
    #[serde(default = "default_hold_days")]
    pub hold_days: BTreeMap<WorkflowType, u32>,
}

impl Default for PayoutHoldPolicy {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            minimum_hold_hours: default_minimum_hold_hours(),
            business_days_only: default_business_days_only(),
            processing_time_of_day: default_processing_time(),
            allow_admin_bypass: default_allow_admin_bypass(),
            require_bypass_reason: default_require_bypass_reason(),
            audit_bypass: default_audit_bypass(),
            hold_days: default_hold_days(),
        }
    }
}

impl PayoutHoldPolicy {
    /// Hold days for a workflow type; absent rows count as zero.
    pub fn hold_days_for(&self, workflow_type: WorkflowType) -> u32 {
        self.hold_days.get(&workflow_type).copied().unwrap_or(0)
    }

    /// Reject malformed policies before they reach a calculator.
    pub fn validate(&self) -> Result<(), PayoutError> {
        if self.minimum_hold_hours < 0 {
            return Err(PayoutError::InvalidPolicy(format!(
                "minimum_hold_hours must be non-negative, got {}",
                self.minimum_hold_hours
            )));
        }
        Ok(())
    }

    /// Parse a policy from YAML and validate it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PayoutError> {
        let policy: Self = serde_yaml::from_str(yaml)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy file from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PayoutError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| {
            PayoutError::PolicyRead {
                path: path.as_ref().to_path_buf(),
                source,
            }
        })?;
        Self::from_yaml_str(&content)
    }
}

/// Hands out the current hold policy. The host owns caching and refresh;
/// the engine just asks at call time.
pub trait PolicyStore: Send {
    fn current_hold_policy(&self) -> PayoutHoldPolicy;
}

/// A policy store that always returns the same policy.
pub struct StaticPolicyStore {
    policy: PayoutHoldPolicy,
}

impl StaticPolicyStore {
    pub fn new(policy: PayoutHoldPolicy) -> Self {
        Self { policy }
    }
}

impl PolicyStore for StaticPolicyStore {
    fn current_hold_policy(&self) -> PayoutHoldPolicy {
        self.policy.clone()
    }
}
