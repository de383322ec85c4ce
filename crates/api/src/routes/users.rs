//! User account administration (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::info;

use strafenkasse_core::auth::{hash_password, require_admin};
use strafenkasse_db::{
    AuditLogRepository, MemberRepository, UserRepository,
    entities::{members, users},
};
use strafenkasse_shared::{AppError, Role, types::MemberStatus};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthUser,
    routes::auth::check_password_length,
};

/// Creates user administration routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}

/// Create payload for a new account.
#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    username: String,
    password: String,
    role: Role,
    member_id: Option<String>,
}

/// Update payload. `password` resets the account password when set.
#[derive(Debug, Deserialize)]
pub struct UpdateUserPayload {
    username: String,
    role: Role,
    member_id: Option<String>,
    password: Option<String>,
}

fn not_found() -> ApiError {
    AppError::NotFound("Benutzer nicht gefunden".to_string()).into()
}

/// Archived members are no longer linkable; existing links survive
/// archiving, new ones are refused.
fn ensure_linkable(member: &members::Model) -> Result<(), ApiError> {
    if member.status == MemberStatus::Archiviert.as_str() {
        return Err(AppError::Validation(
            "Archivierte Mitglieder können nicht verknüpft werden".to_string(),
        )
        .into());
    }
    Ok(())
}

async fn check_member_link(
    state: &AppState,
    member_id: Option<&str>,
) -> Result<(), ApiError> {
    if let Some(member_id) = member_id {
        let member = MemberRepository::new(state.conn())
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation("Verknüpftes Mitglied existiert nicht".to_string())
            })?;
        ensure_linkable(&member)?;
    }
    Ok(())
}

/// GET /users
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<users::Model>>> {
    require_admin(auth.role())?;

    // Password hashes are skipped at serialization.
    let users = UserRepository::new(state.conn()).list().await?;
    Ok(Json(users))
}

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserPayload>,
) -> ApiResult<(StatusCode, Json<users::Model>)> {
    require_admin(auth.role())?;

    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Benutzername darf nicht leer sein".to_string()).into());
    }
    check_password_length(&payload.password, state.security.min_password_length)?;
    check_member_link(&state, payload.member_id.as_deref()).await?;

    let conn = state.conn();
    let repo = UserRepository::new(conn.clone());
    if repo.username_exists(username).await? {
        return Err(AppError::Conflict("Benutzername bereits vergeben".to_string()).into());
    }

    let hash = hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    let user = repo
        .create(username, &hash, payload.role, payload.member_id)
        .await?;

    AuditLogRepository::new(conn)
        .append(
            "user_created",
            Some(auth.username()),
            "user",
            Some(&user.id),
            Some(&format!("{} ({})", user.username, user.role)),
            None,
        )
        .await?;
    info!(username = %user.username, role = %user.role, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserPayload>,
) -> ApiResult<Json<users::Model>> {
    require_admin(auth.role())?;

    let username = payload.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Benutzername darf nicht leer sein".to_string()).into());
    }
    check_member_link(&state, payload.member_id.as_deref()).await?;

    let conn = state.conn();
    let repo = UserRepository::new(conn.clone());
    let current = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    if username != current.username && repo.username_exists(username).await? {
        return Err(AppError::Conflict("Benutzername bereits vergeben".to_string()).into());
    }

    let user = repo
        .update(current, username, payload.role, payload.member_id)
        .await?;

    if let Some(password) = &payload.password {
        check_password_length(password, state.security.min_password_length)?;
        let hash = hash_password(password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        repo.update_password(&user.id, &hash).await?;
    }

    AuditLogRepository::new(conn)
        .append(
            "user_updated",
            Some(auth.username()),
            "user",
            Some(&user.id),
            Some(&format!("{} ({})", user.username, user.role)),
            None,
        )
        .await?;

    Ok(Json(user))
}

/// DELETE /users/{id}
///
/// Self-deletion is refused, and so is deleting the last remaining
/// administrator.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(auth.role())?;

    if id == auth.user_id() {
        return Err(
            AppError::Validation("Eigenes Konto kann nicht gelöscht werden".to_string()).into(),
        );
    }

    let conn = state.conn();
    let repo = UserRepository::new(conn.clone());
    let user = repo.find_by_id(&id).await?.ok_or_else(not_found)?;

    if user.role == Role::Admin.as_str() && repo.count_admins().await? <= 1 {
        return Err(AppError::Validation(
            "Der letzte Administrator kann nicht gelöscht werden".to_string(),
        )
        .into());
    }

    repo.delete(&id).await?;

    AuditLogRepository::new(conn)
        .append(
            "user_deleted",
            Some(auth.username()),
            "user",
            Some(&user.id),
            Some(&user.username),
            None,
        )
        .await?;
    info!(username = %user.username, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with_status(status: MemberStatus) -> members::Model {
        members::Model {
            id: "m1".to_string(),
            first_name: "Karl".to_string(),
            last_name: "Schmidt".to_string(),
            status: status.as_str().to_string(),
            archived_at: (status == MemberStatus::Archiviert)
                .then(|| "2025-01-01T00:00:00.000000Z".to_string()),
            created_at: "2024-08-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_active_and_passive_members_are_linkable() {
        assert!(ensure_linkable(&member_with_status(MemberStatus::Aktiv)).is_ok());
        assert!(ensure_linkable(&member_with_status(MemberStatus::Passiv)).is_ok());
    }

    #[test]
    fn test_archived_member_is_not_linkable() {
        let err = ensure_linkable(&member_with_status(MemberStatus::Archiviert)).unwrap_err();
        assert!(matches!(err.0, AppError::Validation(_)));
    }
}
