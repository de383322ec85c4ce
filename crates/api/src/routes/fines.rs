//! Fine recording routes.
//!
//! Fines snapshot the catalog label and amount at creation time and
//! derive their fiscal-year label from the occurrence date, never from
//! the wall clock at query time. Member, type, date, and fiscal year
//! are immutable after creation.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use strafenkasse_core::fiscal::fiscal_year_for;
use strafenkasse_db::{
    AuditLogRepository, CreateFineInput, FineRepository, FineTypeRepository, MemberRepository,
    entities::fines,
};
use strafenkasse_shared::{
    AppError,
    time::{parse_user_date, to_iso},
    types::MemberStatus,
};

use crate::{AppState, error::{ApiError, ApiResult}, middleware::auth::AuthUser};

/// Creates fine routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fines", get(list_fines).post(create_fine))
        .route("/fines/{id}", put(update_fine).delete(delete_fine))
}

/// Optional fiscal-year filter for listings.
#[derive(Debug, Deserialize)]
pub struct FineListQuery {
    fiscal_year: Option<String>,
}

/// Create payload. `amount` defaults to the catalog amount when the
/// entry has one; `date` defaults to now and accepts retroactive
/// RFC 3339 timestamps or plain `YYYY-MM-DD` dates.
#[derive(Debug, Deserialize)]
pub struct CreateFinePayload {
    member_id: String,
    fine_type_id: String,
    amount: Option<Decimal>,
    date: Option<String>,
    notes: Option<String>,
}

/// Update payload; only amount and notes are mutable.
#[derive(Debug, Deserialize)]
pub struct UpdateFinePayload {
    amount: Option<Decimal>,
    notes: Option<String>,
}

fn not_found() -> ApiError {
    AppError::NotFound("Strafe nicht gefunden".to_string()).into()
}

fn check_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation("Betrag muss positiv sein".to_string()).into());
    }
    Ok(())
}

/// GET /fines?fiscal_year=YYYY/YYYY
async fn list_fines(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<FineListQuery>,
) -> ApiResult<Json<Vec<fines::Model>>> {
    let fines = FineRepository::new(state.conn())
        .list(query.fiscal_year.as_deref())
        .await?;
    Ok(Json(fines))
}

/// POST /fines
async fn create_fine(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateFinePayload>,
) -> ApiResult<(StatusCode, Json<fines::Model>)> {
    let conn = state.conn();

    let fine_type = FineTypeRepository::new(conn.clone())
        .find_by_id(&payload.fine_type_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Strafenart nicht gefunden".to_string()))?;

    let member = MemberRepository::new(conn.clone())
        .find_by_id(&payload.member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Mitglied nicht gefunden".to_string()))?;
    if member.status == MemberStatus::Archiviert.as_str() {
        return Err(AppError::Validation(
            "Strafen können nicht für archivierte Mitglieder erfasst werden".to_string(),
        )
        .into());
    }

    let amount = payload.amount.or(fine_type.amount).ok_or_else(|| {
        AppError::Validation("Betrag ist erforderlich".to_string())
    })?;
    check_amount(amount)?;

    let date = match payload.date.as_deref().map(str::trim) {
        None | Some("") => Utc::now(),
        Some(raw) => parse_user_date(raw)
            .ok_or_else(|| AppError::Validation("Ungültiges Datum".to_string()))?,
    };
    let fiscal_year = fiscal_year_for(date);

    let fine = FineRepository::new(conn.clone())
        .create(CreateFineInput {
            member_id: payload.member_id,
            fine_type_id: fine_type.id.clone(),
            fine_type_label: fine_type.label.clone(),
            amount,
            date: to_iso(date),
            fiscal_year,
            notes: payload.notes,
        })
        .await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_created",
            Some(auth.username()),
            "fine",
            Some(&fine.id),
            Some(&format!(
                "{} ({}) für {}",
                fine.fine_type_label,
                fine.amount,
                member.display_name()
            )),
            None,
        )
        .await?;
    info!(fine_id = %fine.id, fiscal_year = %fine.fiscal_year, "Fine recorded");

    Ok((StatusCode::CREATED, Json(fine)))
}

/// PUT /fines/{id}
async fn update_fine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFinePayload>,
) -> ApiResult<Json<fines::Model>> {
    if let Some(amount) = payload.amount {
        check_amount(amount)?;
    }

    let conn = state.conn();
    let repo = FineRepository::new(conn.clone());
    let current = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    let fine = repo.update(current, payload.amount, payload.notes).await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_updated",
            Some(auth.username()),
            "fine",
            Some(&fine.id),
            Some(&format!("{} ({})", fine.fine_type_label, fine.amount)),
            None,
        )
        .await?;

    Ok(Json(fine))
}

/// DELETE /fines/{id}
async fn delete_fine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let conn = state.conn();
    let repo = FineRepository::new(conn.clone());
    let fine = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    repo.delete(&id).await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_deleted",
            Some(auth.username()),
            "fine",
            Some(&fine.id),
            Some(&format!("{} ({})", fine.fine_type_label, fine.amount)),
            None,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_must_be_positive() {
        assert!(check_amount(dec!(0.00)).is_err());
        assert!(check_amount(dec!(-2.50)).is_err());
        assert!(check_amount(dec!(0.01)).is_ok());
    }
}
