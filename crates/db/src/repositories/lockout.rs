//! Lockout record repository.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use strafenkasse_shared::time::{now_iso, to_iso};
use strafenkasse_shared::types::new_id;

use crate::entities::account_lockouts;

/// Lockout record repository.
///
/// Records are keyed by (kind, key) where kind is "username" or
/// "address". Expired records are treated as absent by the guard and
/// physically removed by the purge.
#[derive(Debug, Clone)]
pub struct LockoutRepository {
    db: DatabaseConnection,
}

impl LockoutRepository {
    /// Creates a new lockout repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the lockout record for a key, expired or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        key_kind: &str,
        lock_key: &str,
    ) -> Result<Option<account_lockouts::Model>, DbErr> {
        account_lockouts::Entity::find()
            .filter(account_lockouts::Column::KeyKind.eq(key_kind))
            .filter(account_lockouts::Column::LockKey.eq(lock_key))
            .one(&self.db)
            .await
    }

    /// Sets (or refreshes) the lockout for a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails.
    pub async fn set(
        &self,
        key_kind: &str,
        lock_key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let lockout = account_lockouts::ActiveModel {
            id: Set(new_id()),
            key_kind: Set(key_kind.to_string()),
            lock_key: Set(lock_key.to_string()),
            expires_at: Set(to_iso(expires_at)),
            created_at: Set(now_iso()),
        };

        account_lockouts::Entity::insert(lockout)
            .on_conflict(
                OnConflict::columns([
                    account_lockouts::Column::KeyKind,
                    account_lockouts::Column::LockKey,
                ])
                .update_columns([account_lockouts::Column::ExpiresAt])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Removes the lockout for a key (explicit clear on successful
    /// login).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn clear(&self, key_kind: &str, lock_key: &str) -> Result<(), DbErr> {
        account_lockouts::Entity::delete_many()
            .filter(account_lockouts::Column::KeyKind.eq(key_kind))
            .filter(account_lockouts::Column::LockKey.eq(lock_key))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Purges records whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = account_lockouts::Entity::delete_many()
            .filter(account_lockouts::Column::ExpiresAt.lte(to_iso(now)))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
