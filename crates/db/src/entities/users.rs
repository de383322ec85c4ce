//! `SeaORM` Entity for the users collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id PHC hash; never a plaintext password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role: spiess, kassenwart, vorstand, or admin.
    pub role: String,
    /// Optional link to a club member, used for personal statistics.
    pub member_id: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
