//! Tests for the lockout state machine.
//!
//! The guard's durable state is exercised here through a small
//! in-memory model driven exactly like the database guard drives the
//! policy: append failed attempts, count the in-window failures, lock
//! when the threshold is reached, and treat expired locks as clear.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::policy::{LockStatus, LockoutPolicy, lock_status, remaining_minutes};

/// In-memory stand-in for one lockout key (username or address).
struct KeyState {
    failures: Vec<DateTime<Utc>>,
    lock_expiry: Option<DateTime<Utc>>,
}

impl KeyState {
    fn new() -> Self {
        Self {
            failures: Vec::new(),
            lock_expiry: None,
        }
    }

    fn status(&self, now: DateTime<Utc>) -> LockStatus {
        lock_status(self.lock_expiry, now)
    }

    /// Mirrors `record_attempt(.., success=false)`: blocked requests
    /// never reach this, so they never inflate the count.
    fn record_failure(&mut self, policy: &LockoutPolicy, now: DateTime<Utc>) {
        self.failures.push(now);
        let window_start = policy.window_start(now);
        let in_window = self.failures.iter().filter(|t| **t >= window_start).count() as u64;
        if policy.should_lock(in_window) {
            self.lock_expiry = Some(policy.lock_expiry(now));
        }
    }

    /// Mirrors the explicit clear on a successful login.
    fn record_success(&mut self) {
        self.lock_expiry = None;
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap()
}

#[test]
fn test_five_failures_in_window_lock_for_fifteen_minutes() {
    let policy = LockoutPolicy::default();
    let mut key = KeyState::new();

    for i in 0..4 {
        key.record_failure(&policy, t0() + Duration::minutes(i));
        assert!(!key.status(t0() + Duration::minutes(i)).locked);
    }

    let fifth = t0() + Duration::minutes(4);
    key.record_failure(&policy, fifth);

    let status = key.status(fifth);
    assert!(status.locked);
    assert_eq!(status.remaining_minutes, 15);
}

#[test]
fn test_blocked_attempt_does_not_extend_lockout() {
    let policy = LockoutPolicy::default();
    let mut key = KeyState::new();

    for i in 0..5 {
        key.record_failure(&policy, t0() + Duration::minutes(i));
    }
    let expiry = key.lock_expiry.unwrap();

    // A sixth request during the lockout is refused before any attempt
    // is recorded; the expiry is unchanged.
    let during = t0() + Duration::minutes(10);
    assert!(key.status(during).locked);
    assert_eq!(key.lock_expiry, Some(expiry));
    assert_eq!(key.failures.len(), 5);
}

#[test]
fn test_lockout_expires_naturally() {
    let policy = LockoutPolicy::default();
    let mut key = KeyState::new();

    for i in 0..5 {
        key.record_failure(&policy, t0() + Duration::minutes(i));
    }

    // Lock was set at minute 4, so it expires at minute 19.
    let after_expiry = t0() + Duration::minutes(20);
    assert_eq!(key.status(after_expiry), LockStatus::CLEAR);
}

#[test]
fn test_success_after_expiry_clears_lock_record() {
    let policy = LockoutPolicy::default();
    let mut key = KeyState::new();

    for i in 0..5 {
        key.record_failure(&policy, t0() + Duration::minutes(i));
    }

    key.record_success();
    assert_eq!(key.status(t0() + Duration::minutes(5)), LockStatus::CLEAR);
}

#[test]
fn test_old_failures_fall_out_of_window() {
    let policy = LockoutPolicy::default();
    let mut key = KeyState::new();

    // Four failures early on, the fifth 31 minutes later: the first
    // four are outside the trailing window by then.
    for i in 0..4 {
        key.record_failure(&policy, t0() + Duration::minutes(i));
    }
    key.record_failure(&policy, t0() + Duration::minutes(34));

    assert!(!key.status(t0() + Duration::minutes(34)).locked);
}

#[test]
fn test_remaining_minutes_rounds_up() {
    let now = t0();
    assert_eq!(remaining_minutes(now + Duration::seconds(61), now), 2);
    assert_eq!(remaining_minutes(now + Duration::seconds(60), now), 1);
    assert_eq!(remaining_minutes(now + Duration::seconds(1), now), 1);
    // Never reports less than one minute while locked.
    assert_eq!(remaining_minutes(now, now), 1);
}

#[test]
fn test_expired_lock_record_is_inert_without_deletion() {
    let now = t0();
    let status = lock_status(Some(now - Duration::seconds(1)), now);
    assert_eq!(status, LockStatus::CLEAR);
}

#[test]
fn test_policy_from_security_config() {
    let cfg = strafenkasse_shared::config::SecurityConfig::default();
    let policy = LockoutPolicy::from(&cfg);
    assert_eq!(policy.max_failures, 5);
    assert_eq!(policy.failure_window, Duration::minutes(30));
    assert_eq!(policy.lockout_duration, Duration::minutes(15));
    assert_eq!(policy.attempt_retention, Duration::minutes(60));
}
