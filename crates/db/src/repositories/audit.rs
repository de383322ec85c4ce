//! Append-only audit log repository.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
};
use strafenkasse_shared::time::now_iso;
use strafenkasse_shared::types::new_id;

use crate::entities::audit_logs;

/// Audit log repository. Entries are only ever appended and read,
/// never mutated or deleted.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one audit entry.
    ///
    /// `actor` is None for anonymous failures (e.g. unknown-user login
    /// attempts).
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn append(
        &self,
        action: &str,
        actor: Option<&str>,
        resource_type: &str,
        resource_id: Option<&str>,
        detail: Option<&str>,
        source_ip: Option<&str>,
    ) -> Result<(), DbErr> {
        let entry = audit_logs::ActiveModel {
            id: Set(new_id()),
            timestamp: Set(now_iso()),
            action: Set(action.to_string()),
            actor: Set(actor.map(String::from)),
            resource_type: Set(resource_type.to_string()),
            resource_id: Set(resource_id.map(String::from)),
            detail: Set(detail.map(String::from)),
            source_ip: Set(source_ip.map(String::from)),
        };

        entry.insert(&self.db).await?;
        Ok(())
    }

    /// Lists the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_recent(&self, limit: u64) -> Result<Vec<audit_logs::Model>, DbErr> {
        audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
    }
}
