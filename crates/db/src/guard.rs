//! Brute-force login guard.
//!
//! Wires the durable attempt/lockout records to the pure lockout
//! policy in `strafenkasse_core::lockout`. Username and source address
//! are tracked as independent keys: locking one never implies locking
//! the other, though a single failing request can trigger both.
//!
//! Concurrent failures can race the threshold check; the worst case is
//! a lockout triggering one attempt later than ideal, which the policy
//! tolerates.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::{debug, warn};

use strafenkasse_core::lockout::{LockStatus, LockoutPolicy, lock_status};
use strafenkasse_shared::time::parse_iso;

use crate::repositories::{LockoutRepository, LoginAttemptRepository};

/// Lockout key kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKey {
    /// Keyed by username.
    Username,
    /// Keyed by source address.
    Address,
}

impl LockKey {
    /// Returns the stored kind discriminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Address => "address",
        }
    }
}

/// The brute-force guard consulted by the login flow.
#[derive(Debug, Clone)]
pub struct LoginGuard {
    attempts: LoginAttemptRepository,
    lockouts: LockoutRepository,
    policy: LockoutPolicy,
}

impl LoginGuard {
    /// Creates a guard over the given connection and policy.
    #[must_use]
    pub fn new(db: DatabaseConnection, policy: LockoutPolicy) -> Self {
        Self {
            attempts: LoginAttemptRepository::new(db.clone()),
            lockouts: LockoutRepository::new(db),
            policy,
        }
    }

    /// Checks whether the username or the source address is currently
    /// locked. When both are, the longer remaining time wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn check(
        &self,
        username: &str,
        source_ip: &str,
        now: DateTime<Utc>,
    ) -> Result<LockStatus, DbErr> {
        let by_username = self.key_status(LockKey::Username, username, now).await?;
        let by_address = self.key_status(LockKey::Address, source_ip, now).await?;

        Ok([by_username, by_address]
            .into_iter()
            .filter(|s| s.locked)
            .max_by_key(|s| s.remaining_minutes)
            .unwrap_or(LockStatus::CLEAR))
    }

    /// Records a login attempt and, on failure, escalates to a lockout
    /// for every key whose in-window failure count reached the
    /// threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn record_attempt(
        &self,
        username: &str,
        source_ip: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.attempts
            .record(username, source_ip, success, now)
            .await?;

        if success {
            // A successful login clears the username-keyed lockout
            // only; the address key is left to expire naturally.
            self.lockouts
                .clear(LockKey::Username.as_str(), username)
                .await?;
            return Ok(());
        }

        let window_start = self.policy.window_start(now);

        let username_failures = self
            .attempts
            .count_failures_for_username(username, window_start)
            .await?;
        if self.policy.should_lock(username_failures) {
            warn!(username, failures = username_failures, "Locking username");
            self.lockouts
                .set(
                    LockKey::Username.as_str(),
                    username,
                    self.policy.lock_expiry(now),
                )
                .await?;
        }

        let address_failures = self
            .attempts
            .count_failures_for_address(source_ip, window_start)
            .await?;
        if self.policy.should_lock(address_failures) {
            warn!(source_ip, failures = address_failures, "Locking address");
            self.lockouts
                .set(
                    LockKey::Address.as_str(),
                    source_ip,
                    self.policy.lock_expiry(now),
                )
                .await?;
        }

        Ok(())
    }

    /// Opportunistic cleanup: purges attempts past retention and
    /// expired lockout records.
    ///
    /// # Errors
    ///
    /// Returns an error if a database delete fails.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<(), DbErr> {
        let purged_attempts = self
            .attempts
            .purge_before(self.policy.retention_cutoff(now))
            .await?;
        let purged_lockouts = self.lockouts.purge_expired(now).await?;
        if purged_attempts > 0 || purged_lockouts > 0 {
            debug!(purged_attempts, purged_lockouts, "Guard sweep");
        }
        Ok(())
    }

    async fn key_status(
        &self,
        kind: LockKey,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<LockStatus, DbErr> {
        let record = self.lockouts.find(kind.as_str(), key).await?;
        // An unparseable or expired expiry reads as CLEAR; no write is
        // needed to make an expired record inert.
        let expiry = record.and_then(|r| parse_iso(&r.expires_at));
        Ok(lock_status(expiry, now))
    }
}
