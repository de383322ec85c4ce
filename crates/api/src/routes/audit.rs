//! Audit log inspection (admin only).

use axum::{Json, Router, extract::State, routing::get};

use strafenkasse_core::auth::require_admin;
use strafenkasse_db::{AuditLogRepository, entities::audit_logs};

use crate::{AppState, error::ApiResult, middleware::auth::AuthUser};

/// How many entries one page of the audit log shows.
const AUDIT_LOG_LIMIT: u64 = 200;

/// Creates audit log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

/// GET /audit-logs
async fn list_audit_logs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<audit_logs::Model>>> {
    require_admin(auth.role())?;

    let entries = AuditLogRepository::new(state.conn())
        .list_recent(AUDIT_LOG_LIMIT)
        .await?;
    Ok(Json(entries))
}
