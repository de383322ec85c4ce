//! Lockout policy decisions.

use chrono::{DateTime, Duration, Utc};
use strafenkasse_shared::config::SecurityConfig;

/// Brute-force lockout policy.
///
/// Applied independently per username and per source address. All
/// values are configuration, not hardcoded law.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts within the window that trigger a lockout.
    pub max_failures: u64,
    /// Trailing window over failed attempts.
    pub failure_window: Duration,
    /// How long a triggered lockout lasts.
    pub lockout_duration: Duration,
    /// Horizon after which attempt records are no longer considered
    /// and may be purged.
    pub attempt_retention: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failures: 5,
            failure_window: Duration::minutes(30),
            lockout_duration: Duration::minutes(15),
            attempt_retention: Duration::minutes(60),
        }
    }
}

impl From<&SecurityConfig> for LockoutPolicy {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            max_failures: cfg.max_failed_attempts,
            failure_window: Duration::minutes(cfg.failure_window_minutes),
            lockout_duration: Duration::minutes(cfg.lockout_minutes),
            attempt_retention: Duration::minutes(cfg.attempt_retention_minutes),
        }
    }
}

impl LockoutPolicy {
    /// Start of the trailing failure-counting window.
    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.failure_window
    }

    /// Cutoff before which attempt records may be purged.
    #[must_use]
    pub fn retention_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.attempt_retention
    }

    /// Whether the in-window failure count triggers a lockout.
    #[must_use]
    pub const fn should_lock(&self, failures_in_window: u64) -> bool {
        failures_in_window >= self.max_failures
    }

    /// Expiry timestamp for a lockout triggered now.
    #[must_use]
    pub fn lock_expiry(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.lockout_duration
    }
}

/// Result of a lockout query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockStatus {
    /// Whether the key is currently locked.
    pub locked: bool,
    /// Whole minutes until the lockout expires; 0 when not locked.
    pub remaining_minutes: i64,
}

impl LockStatus {
    /// The unlocked status.
    pub const CLEAR: Self = Self {
        locked: false,
        remaining_minutes: 0,
    };
}

/// Evaluates a stored lockout expiry against "now".
///
/// An expired lockout record is inert: it reads as CLEAR regardless of
/// whether it has been physically deleted yet.
#[must_use]
pub fn lock_status(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LockStatus {
    match expiry {
        Some(exp) if exp > now => LockStatus {
            locked: true,
            remaining_minutes: remaining_minutes(exp, now),
        },
        _ => LockStatus::CLEAR,
    }
}

/// Whole minutes until expiry, rounded up, minimum 1.
#[must_use]
pub fn remaining_minutes(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (expiry - now).num_seconds();
    ((secs + 59) / 60).max(1)
}
