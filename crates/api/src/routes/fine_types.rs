//! Fine-type catalog routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use strafenkasse_core::auth::require_kassenwart;
use strafenkasse_db::{AuditLogRepository, FineTypeRepository, entities::fine_types};
use strafenkasse_shared::AppError;

use crate::{AppState, error::{ApiError, ApiResult}, middleware::auth::AuthUser};

/// Creates fine-type catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fine-types", get(list_fine_types).post(create_fine_type))
        .route("/fine-types/{id}", put(update_fine_type).delete(delete_fine_type))
}

/// Create/update payload. `amount` is None for free-amount entries.
#[derive(Debug, Deserialize)]
pub struct FineTypePayload {
    label: String,
    amount: Option<Decimal>,
}

fn validate_payload(payload: &FineTypePayload) -> Result<&str, ApiError> {
    let label = payload.label.trim();
    if label.is_empty() {
        return Err(AppError::Validation("Bezeichnung darf nicht leer sein".to_string()).into());
    }
    if let Some(amount) = payload.amount
        && amount <= Decimal::ZERO
    {
        return Err(AppError::Validation("Betrag muss positiv sein".to_string()).into());
    }
    Ok(label)
}

fn not_found() -> ApiError {
    AppError::NotFound("Strafenart nicht gefunden".to_string()).into()
}

/// GET /fine-types
async fn list_fine_types(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<fine_types::Model>>> {
    let fine_types = FineTypeRepository::new(state.conn()).list().await?;
    Ok(Json(fine_types))
}

/// POST /fine-types
async fn create_fine_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<FineTypePayload>,
) -> ApiResult<(StatusCode, Json<fine_types::Model>)> {
    require_kassenwart(auth.role())?;
    let label = validate_payload(&payload)?;

    let conn = state.conn();
    let fine_type = FineTypeRepository::new(conn.clone())
        .create(label, payload.amount)
        .await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_type_created",
            Some(auth.username()),
            "fine_type",
            Some(&fine_type.id),
            Some(&fine_type.label),
            None,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(fine_type)))
}

/// PUT /fine-types/{id}
///
/// Existing fines keep their label and amount snapshots.
async fn update_fine_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<FineTypePayload>,
) -> ApiResult<Json<fine_types::Model>> {
    require_kassenwart(auth.role())?;
    let label = validate_payload(&payload)?;

    let conn = state.conn();
    let repo = FineTypeRepository::new(conn.clone());
    let current = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    let fine_type = repo.update(current, label, payload.amount).await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_type_updated",
            Some(auth.username()),
            "fine_type",
            Some(&fine_type.id),
            Some(&fine_type.label),
            None,
        )
        .await?;

    Ok(Json(fine_type))
}

/// DELETE /fine-types/{id}
async fn delete_fine_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_kassenwart(auth.role())?;

    let conn = state.conn();
    let repo = FineTypeRepository::new(conn.clone());
    let fine_type = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    repo.delete(&id).await?;

    AuditLogRepository::new(conn)
        .append(
            "fine_type_deleted",
            Some(auth.username()),
            "fine_type",
            Some(&fine_type.id),
            Some(&fine_type.label),
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
    fn test_label_must_not_be_blank() {
        let p = FineTypePayload {
            label: "  ".to_string(),
            amount: None,
        };
        assert!(validate_payload(&p).is_err());
    }

    #[test]
    fn test_amount_must_be_positive_when_present() {
        let p = FineTypePayload {
            label: "Zu spät".to_string(),
            amount: Some(dec!(-1.00)),
        };
        assert!(validate_payload(&p).is_err());

        let p = FineTypePayload {
            label: "Zu spät".to_string(),
            amount: Some(dec!(0.50)),
        };
        assert_eq!(validate_payload(&p).unwrap(), "Zu spät");
    }

    #[test]
    fn test_free_amount_entry_allowed() {
        let p = FineTypePayload {
            label: "Sonstiges".to_string(),
            amount: None,
        };
        assert!(validate_payload(&p).is_ok());
    }
}
