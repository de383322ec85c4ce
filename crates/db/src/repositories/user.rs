//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use strafenkasse_shared::Role;
use strafenkasse_shared::time::now_iso;
use strafenkasse_shared::types::new_id;

use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all users, alphabetically by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if a username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
        member_id: Option<String>,
    ) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(new_id()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            member_id: Set(member_id),
            created_at: Set(now_iso()),
        };

        user.insert(&self.db).await
    }

    /// Updates a user's username, role, and member link.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        current: users::Model,
        username: &str,
        role: Role,
        member_id: Option<String>,
    ) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            id: Set(current.id),
            username: Set(username.to_string()),
            password_hash: Set(current.password_hash),
            role: Set(role.as_str().to_string()),
            member_id: Set(member_id),
            created_at: Set(current.created_at),
        };

        user.update(&self.db).await
    }

    /// Replaces a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), DbErr> {
        users::ActiveModel {
            id: Set(id.to_string()),
            password_hash: Set(password_hash.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    /// Deletes a user. Returns false when the user did not exist.
    ///
    /// The last-admin and self-deletion protections are enforced by
    /// the caller before this is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = users::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts administrative accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_admins(&self) -> Result<u64, DbErr> {
        users::Entity::find()
            .filter(users::Column::Role.eq(Role::Admin.as_str()))
            .count(&self.db)
            .await
    }
}
