//! Member repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use strafenkasse_shared::time::now_iso;
use strafenkasse_shared::types::{MemberStatus, new_id};

use crate::entities::{fines, members};

/// Member repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all members, alphabetically by last name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<members::Model>, DbErr> {
        members::Entity::find()
            .order_by_asc(members::Column::LastName)
            .order_by_asc(members::Column::FirstName)
            .all(&self.db)
            .await
    }

    /// Finds a member by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        status: MemberStatus,
    ) -> Result<members::Model, DbErr> {
        let archived_at = (status == MemberStatus::Archiviert).then(now_iso);
        let member = members::ActiveModel {
            id: Set(new_id()),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            status: Set(status.as_str().to_string()),
            archived_at: Set(archived_at),
            created_at: Set(now_iso()),
        };

        member.insert(&self.db).await
    }

    /// Updates a member's name and status.
    ///
    /// `archived_at` is set exactly when the status transitions into
    /// archiviert and cleared exactly when it transitions out.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        current: members::Model,
        first_name: &str,
        last_name: &str,
        status: MemberStatus,
    ) -> Result<members::Model, DbErr> {
        let was_archived = current.status == MemberStatus::Archiviert.as_str();
        let archived_at = match (was_archived, status == MemberStatus::Archiviert) {
            (false, true) => Set(Some(now_iso())),
            (true, false) => Set(None),
            _ => Set(current.archived_at.clone()),
        };

        let member = members::ActiveModel {
            id: Set(current.id),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            status: Set(status.as_str().to_string()),
            archived_at,
            created_at: Set(current.created_at),
        };

        member.update(&self.db).await
    }

    /// Deletes a member and all of that member's fines.
    ///
    /// The cascade is an explicit two-step transaction (fines first,
    /// then the member), not a store-level cascade feature. Returns
    /// false when the member did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub async fn delete_with_fines(&self, id: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        fines::Entity::delete_many()
            .filter(fines::Column::MemberId.eq(id))
            .exec(&txn)
            .await?;
        let result = members::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
