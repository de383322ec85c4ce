//! `SeaORM` Entity for the fines collection.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub member_id: String,
    pub fine_type_id: String,
    /// Label snapshot taken at creation; later catalog edits do not
    /// rewrite past fines.
    pub fine_type_label: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    /// Occurrence timestamp (ISO-8601 UTC).
    pub date: String,
    /// Fiscal-year label, computed once at creation from `date` and
    /// never recomputed on read.
    pub fiscal_year: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id"
    )]
    Members,
    #[sea_orm(
        belongs_to = "super::fine_types::Entity",
        from = "Column::FineTypeId",
        to = "super::fine_types::Column::Id"
    )]
    FineTypes,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::fine_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FineTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
