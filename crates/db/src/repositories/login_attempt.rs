//! Time-windowed login attempt repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use strafenkasse_shared::time::to_iso;
use strafenkasse_shared::types::new_id;

use crate::entities::login_attempts;

/// Login attempt repository for the brute-force guard.
#[derive(Debug, Clone)]
pub struct LoginAttemptRepository {
    db: DatabaseConnection,
}

impl LoginAttemptRepository {
    /// Creates a new login attempt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one attempt record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record(
        &self,
        username: &str,
        source_ip: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let attempt = login_attempts::ActiveModel {
            id: Set(new_id()),
            username: Set(username.to_string()),
            source_ip: Set(source_ip.to_string()),
            attempted_at: Set(to_iso(now)),
            success: Set(success),
        };

        attempt.insert(&self.db).await?;
        Ok(())
    }

    /// Counts failed attempts for a username since the window start.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_failures_for_username(
        &self,
        username: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        login_attempts::Entity::find()
            .filter(login_attempts::Column::Username.eq(username))
            .filter(login_attempts::Column::Success.eq(false))
            .filter(login_attempts::Column::AttemptedAt.gte(to_iso(since)))
            .count(&self.db)
            .await
    }

    /// Counts failed attempts from a source address since the window
    /// start.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_failures_for_address(
        &self,
        source_ip: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        login_attempts::Entity::find()
            .filter(login_attempts::Column::SourceIp.eq(source_ip))
            .filter(login_attempts::Column::Success.eq(false))
            .filter(login_attempts::Column::AttemptedAt.gte(to_iso(since)))
            .count(&self.db)
            .await
    }

    /// Purges attempt records older than the retention cutoff.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = login_attempts::Entity::delete_many()
            .filter(login_attempts::Column::AttemptedAt.lt(to_iso(cutoff)))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
