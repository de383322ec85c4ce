//! Fine-type catalog repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use strafenkasse_shared::time::now_iso;
use strafenkasse_shared::types::new_id;

use crate::entities::fine_types;

/// Fine-type repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct FineTypeRepository {
    db: DatabaseConnection,
}

impl FineTypeRepository {
    /// Creates a new fine-type repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the catalog, alphabetically by label.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<fine_types::Model>, DbErr> {
        fine_types::Entity::find()
            .order_by_asc(fine_types::Column::Label)
            .all(&self.db)
            .await
    }

    /// Finds a fine type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<fine_types::Model>, DbErr> {
        fine_types::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new catalog entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        label: &str,
        amount: Option<Decimal>,
    ) -> Result<fine_types::Model, DbErr> {
        let fine_type = fine_types::ActiveModel {
            id: Set(new_id()),
            label: Set(label.to_string()),
            amount: Set(amount),
            created_at: Set(now_iso()),
        };

        fine_type.insert(&self.db).await
    }

    /// Updates a catalog entry. Past fines keep their label snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        current: fine_types::Model,
        label: &str,
        amount: Option<Decimal>,
    ) -> Result<fine_types::Model, DbErr> {
        let fine_type = fine_types::ActiveModel {
            id: Set(current.id),
            label: Set(label.to_string()),
            amount: Set(amount),
            created_at: Set(current.created_at),
        };

        fine_type.update(&self.db).await
    }

    /// Deletes a catalog entry. Returns false when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = fine_types::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
