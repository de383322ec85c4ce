//! `SeaORM` Entity for the append-only audit log.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub timestamp: String,
    /// Action kind, e.g. "login_success" or "member_deleted".
    pub action: String,
    /// Acting username; None for anonymous failures.
    pub actor: Option<String>,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub detail: Option<String>,
    pub source_ip: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
