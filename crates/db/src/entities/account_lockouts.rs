//! `SeaORM` Entity for login lockout records.
//!
//! Lockouts are keyed independently by username and by source address.
//! A record is only honored while its expiry is in the future; expired
//! records are inert until the next purge.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_lockouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// "username" or "address".
    pub key_kind: String,
    /// The locked username or source address.
    pub lock_key: String,
    pub expires_at: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
