//! Member management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::info;

use strafenkasse_core::auth::require_vorstand;
use strafenkasse_db::{AuditLogRepository, MemberRepository, entities::members};
use strafenkasse_shared::{AppError, types::MemberStatus};

use crate::{AppState, error::{ApiError, ApiResult}, middleware::auth::AuthUser};

/// Creates member routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members).post(create_member))
        .route("/members/{id}", put(update_member).delete(delete_member))
}

/// Create/update payload.
///
/// `name` is the legacy combined field accepted for older clients; it
/// is split on the last space when the structured fields are absent.
#[derive(Debug, Deserialize)]
pub struct MemberPayload {
    first_name: Option<String>,
    last_name: Option<String>,
    name: Option<String>,
    status: Option<MemberStatus>,
}

fn resolve_name(payload: &MemberPayload) -> Result<(String, String), ApiError> {
    let first = payload.first_name.as_deref().map(str::trim).unwrap_or("");
    let last = payload.last_name.as_deref().map(str::trim).unwrap_or("");
    if !first.is_empty() {
        return Ok((first.to_string(), last.to_string()));
    }

    let combined = payload.name.as_deref().map(str::trim).unwrap_or("");
    if combined.is_empty() {
        return Err(AppError::Validation("Name darf nicht leer sein".to_string()).into());
    }
    match combined.rsplit_once(' ') {
        Some((first, last)) => Ok((first.trim().to_string(), last.to_string())),
        None => Ok((combined.to_string(), String::new())),
    }
}

fn stored_status(member: &members::Model) -> Result<MemberStatus, ApiError> {
    MemberStatus::parse(&member.status)
        .ok_or_else(|| AppError::Internal("invalid stored member status".to_string()).into())
}

fn not_found() -> ApiError {
    AppError::NotFound("Mitglied nicht gefunden".to_string()).into()
}

/// GET /members
async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<members::Model>>> {
    let members = MemberRepository::new(state.conn()).list().await?;
    Ok(Json(members))
}

/// POST /members
async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<MemberPayload>,
) -> ApiResult<(StatusCode, Json<members::Model>)> {
    require_vorstand(auth.role())?;

    let (first_name, last_name) = resolve_name(&payload)?;
    let status = payload.status.unwrap_or(MemberStatus::Aktiv);

    let conn = state.conn();
    let member = MemberRepository::new(conn.clone())
        .create(&first_name, &last_name, status)
        .await?;

    AuditLogRepository::new(conn)
        .append(
            "member_created",
            Some(auth.username()),
            "member",
            Some(&member.id),
            Some(&member.display_name()),
            None,
        )
        .await?;
    info!(member_id = %member.id, "Member created");

    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /members/{id}
async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MemberPayload>,
) -> ApiResult<Json<members::Model>> {
    require_vorstand(auth.role())?;

    let conn = state.conn();
    let repo = MemberRepository::new(conn.clone());
    let current = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    let (first_name, last_name) = resolve_name(&payload)?;
    let status = match payload.status {
        Some(status) => status,
        None => stored_status(&current)?,
    };

    let member = repo.update(current, &first_name, &last_name, status).await?;

    AuditLogRepository::new(conn)
        .append(
            "member_updated",
            Some(auth.username()),
            "member",
            Some(&member.id),
            Some(&member.display_name()),
            None,
        )
        .await?;

    Ok(Json(member))
}

/// DELETE /members/{id}
///
/// Only archived members can be deleted; deletion also removes all of
/// the member's fines.
async fn delete_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_vorstand(auth.role())?;

    let conn = state.conn();
    let repo = MemberRepository::new(conn.clone());
    let member = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    if stored_status(&member)? != MemberStatus::Archiviert {
        return Err(AppError::Validation(
            "Nur archivierte Mitglieder können gelöscht werden".to_string(),
        )
        .into());
    }

    repo.delete_with_fines(&id).await?;

    AuditLogRepository::new(conn)
        .append(
            "member_deleted",
            Some(auth.username()),
            "member",
            Some(&member.id),
            Some(&member.display_name()),
            None,
        )
        .await?;
    info!(member_id = %member.id, "Member and fines deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(
        first: Option<&str>,
        last: Option<&str>,
        name: Option<&str>,
    ) -> MemberPayload {
        MemberPayload {
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            name: name.map(String::from),
            status: None,
        }
    }

    #[test]
    fn test_structured_name_wins() {
        let p = payload(Some("Karl"), Some("Schmidt"), Some("ignored"));
        assert_eq!(
            resolve_name(&p).unwrap(),
            ("Karl".to_string(), "Schmidt".to_string())
        );
    }

    #[test]
    fn test_legacy_name_splits_on_last_space() {
        let p = payload(None, None, Some("Karl Heinz Schmidt"));
        assert_eq!(
            resolve_name(&p).unwrap(),
            ("Karl Heinz".to_string(), "Schmidt".to_string())
        );
    }

    #[test]
    fn test_single_word_name_has_empty_last_name() {
        let p = payload(None, None, Some("Karl"));
        assert_eq!(resolve_name(&p).unwrap(), ("Karl".to_string(), String::new()));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(resolve_name(&payload(None, None, Some("   "))).is_err());
        assert!(resolve_name(&payload(None, None, None)).is_err());
    }
}
