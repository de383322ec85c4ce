//! Fine repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use strafenkasse_shared::types::new_id;

use crate::entities::fines;

/// Input for creating a fine.
///
/// The fiscal-year label and the fine-type label snapshot are resolved
/// by the caller before persistence; neither is ever recomputed.
#[derive(Debug, Clone)]
pub struct CreateFineInput {
    /// Owning member id.
    pub member_id: String,
    /// Catalog entry id.
    pub fine_type_id: String,
    /// Label snapshot taken from the catalog at creation time.
    pub fine_type_label: String,
    /// Positive fine amount.
    pub amount: Decimal,
    /// Occurrence timestamp (ISO-8601 UTC).
    pub date: String,
    /// Fiscal-year label derived from `date`.
    pub fiscal_year: String,
    /// Optional free-text note.
    pub notes: Option<String>,
}

/// Fine repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct FineRepository {
    db: DatabaseConnection,
}

impl FineRepository {
    /// Creates a new fine repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists fines, optionally restricted to one fiscal year, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, fiscal_year: Option<&str>) -> Result<Vec<fines::Model>, DbErr> {
        let mut query = fines::Entity::find().order_by_desc(fines::Column::Date);
        if let Some(year) = fiscal_year {
            query = query.filter(fines::Column::FiscalYear.eq(year));
        }
        query.all(&self.db).await
    }

    /// Finds a fine by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<fines::Model>, DbErr> {
        fines::Entity::find_by_id(id).one(&self.db).await
    }

    /// All fines stored for one fiscal year (statistics input).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn for_fiscal_year(&self, fiscal_year: &str) -> Result<Vec<fines::Model>, DbErr> {
        fines::Entity::find()
            .filter(fines::Column::FiscalYear.eq(fiscal_year))
            .all(&self.db)
            .await
    }

    /// Distinct fiscal-year labels present in stored fines, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn distinct_fiscal_years(&self) -> Result<Vec<String>, DbErr> {
        fines::Entity::find()
            .select_only()
            .column(fines::Column::FiscalYear)
            .distinct()
            .order_by_desc(fines::Column::FiscalYear)
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }

    /// Creates a new fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateFineInput) -> Result<fines::Model, DbErr> {
        let fine = fines::ActiveModel {
            id: Set(new_id()),
            member_id: Set(input.member_id),
            fine_type_id: Set(input.fine_type_id),
            fine_type_label: Set(input.fine_type_label),
            amount: Set(input.amount),
            date: Set(input.date),
            fiscal_year: Set(input.fiscal_year),
            notes: Set(input.notes),
        };

        fine.insert(&self.db).await
    }

    /// Updates a fine's amount and/or note. Member, type, date, and
    /// fiscal year are immutable after creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        current: fines::Model,
        amount: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<fines::Model, DbErr> {
        apply_changes(current, amount, notes).update(&self.db).await
    }

    /// Deletes a fine. Returns false when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = fines::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

/// Maps an update request onto the stored row. Only amount and notes
/// may end up `Set`; every other column stays `Unchanged` so the
/// update statement never rewrites it.
fn apply_changes(
    current: fines::Model,
    amount: Option<Decimal>,
    notes: Option<String>,
) -> fines::ActiveModel {
    let mut fine: fines::ActiveModel = current.into();
    if let Some(amount) = amount {
        fine.amount = Set(amount);
    }
    if let Some(notes) = notes {
        fine.notes = Set(Some(notes));
    }
    fine
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::ActiveValue;

    fn stored_fine() -> fines::Model {
        fines::Model {
            id: "f1".to_string(),
            member_id: "m1".to_string(),
            fine_type_id: "t1".to_string(),
            fine_type_label: "Zu spät zum Antreten".to_string(),
            amount: dec!(0.50),
            date: "2025-07-31T20:00:00.000000Z".to_string(),
            fiscal_year: "2024/2025".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_update_touches_only_amount_and_notes() {
        let fine = apply_changes(stored_fine(), Some(dec!(2.00)), Some("nachträglich".into()));

        assert!(matches!(fine.amount, ActiveValue::Set(a) if a == dec!(2.00)));
        assert!(matches!(fine.notes, ActiveValue::Set(Some(_))));
        // The stored fiscal-year label and date survive every update.
        assert!(matches!(fine.date, ActiveValue::Unchanged(_)));
        assert!(matches!(fine.fiscal_year, ActiveValue::Unchanged(_)));
        assert!(matches!(fine.member_id, ActiveValue::Unchanged(_)));
        assert!(matches!(fine.fine_type_id, ActiveValue::Unchanged(_)));
        assert!(matches!(fine.fine_type_label, ActiveValue::Unchanged(_)));
    }

    #[test]
    fn test_update_with_no_fields_changes_nothing() {
        let fine = apply_changes(stored_fine(), None, None);

        assert!(matches!(fine.amount, ActiveValue::Unchanged(_)));
        assert!(matches!(fine.notes, ActiveValue::Unchanged(None)));
        assert!(matches!(fine.fiscal_year, ActiveValue::Unchanged(_)));
    }
}
