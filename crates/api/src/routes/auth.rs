//! Login and password management.
//!
//! The login flow consults the brute-force guard before anything else
//! and never reveals whether a username exists: unknown user and wrong
//! password produce byte-identical responses, and both count as failed
//! attempts. Blocked requests are refused before credential checking
//! and are not recorded as attempts.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    routing::{post, put},
};
use chrono::Utc;
use tracing::{error, info, warn};

use strafenkasse_core::auth::{hash_password, verify_password};
use strafenkasse_core::lockout::LockoutPolicy;
use strafenkasse_db::{AuditLogRepository, LoginGuard, UserRepository};
use strafenkasse_shared::{
    AppError, Role,
    auth::{ChangePasswordRequest, LoginRequest, LoginResponse},
};

use crate::{AppState, error::{ApiError, ApiResult}, middleware::auth::AuthUser};

/// Public authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Authentication routes behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/change-password", put(change_password))
}

/// Resolves the request's source address, honoring `X-Forwarded-For`
/// when a proxy sits in front of the server.
fn source_address(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| addr.ip().to_string(), ToString::to_string)
}

/// The one response shape for every credential failure.
fn invalid_credentials() -> ApiError {
    AppError::Unauthorized("Benutzername oder Passwort falsch".to_string()).into()
}

/// Rejects passwords below the configured minimum length.
pub(crate) fn check_password_length(password: &str, min_length: usize) -> Result<(), ApiError> {
    if password.chars().count() < min_length {
        return Err(AppError::Validation(format!(
            "Passwort muss mindestens {min_length} Zeichen lang sein"
        ))
        .into());
    }
    Ok(())
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let now = Utc::now();
    let source_ip = source_address(&headers, addr);

    let conn = state.conn();
    let guard = LoginGuard::new(conn.clone(), LockoutPolicy::from(&*state.security));
    let users = UserRepository::new(conn.clone());
    let audit = AuditLogRepository::new(conn);

    // Opportunistic cleanup of old attempts and expired lockouts.
    guard.sweep(now).await?;

    let lock = guard.check(&payload.username, &source_ip, now).await?;
    if lock.locked {
        warn!(username = %payload.username, %source_ip, "Login blocked by active lockout");
        audit
            .append(
                "login_blocked",
                None,
                "user",
                None,
                Some(&format!(
                    "lockout active, {} minute(s) remaining",
                    lock.remaining_minutes
                )),
                Some(&source_ip),
            )
            .await?;
        return Err(AppError::RateLimited {
            remaining_minutes: lock.remaining_minutes,
        }
        .into());
    }

    let Some(user) = users.find_by_username(&payload.username).await? else {
        guard
            .record_attempt(&payload.username, &source_ip, false, now)
            .await?;
        audit
            .append(
                "login_failed",
                None,
                "user",
                None,
                Some("invalid credentials"),
                Some(&source_ip),
            )
            .await?;
        return Err(invalid_credentials());
    };

    let verified = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, "Password verification failed");
        ApiError(AppError::Internal("password verification failed".to_string()))
    })?;
    if !verified {
        guard
            .record_attempt(&payload.username, &source_ip, false, now)
            .await?;
        audit
            .append(
                "login_failed",
                Some(&user.username),
                "user",
                Some(&user.id),
                Some("invalid credentials"),
                Some(&source_ip),
            )
            .await?;
        return Err(invalid_credentials());
    }

    // Success also clears the username-keyed lockout.
    guard
        .record_attempt(&payload.username, &source_ip, true, now)
        .await?;

    let role = Role::parse(&user.role).ok_or_else(|| {
        error!(role = %user.role, "Stored role does not parse");
        ApiError(AppError::Internal("invalid stored role".to_string()))
    })?;

    let token = state
        .jwt_service
        .generate_token(&user.id, &user.username, role, user.member_id.clone())
        .map_err(|e| {
            error!(error = %e, "Token generation failed");
            ApiError(AppError::Internal("token generation failed".to_string()))
        })?;

    audit
        .append(
            "login_success",
            Some(&user.username),
            "user",
            Some(&user.id),
            None,
            Some(&source_ip),
        )
        .await?;
    info!(username = %user.username, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        role,
        username: user.username,
        member_id: user.member_id,
    }))
}

/// PUT /auth/change-password
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let conn = state.conn();
    let users = UserRepository::new(conn.clone());
    let audit = AuditLogRepository::new(conn);

    let user = users
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Benutzer nicht gefunden".to_string()))?;

    let verified = verify_password(&payload.current_password, &user.password_hash).map_err(|e| {
        error!(error = %e, "Password verification failed");
        ApiError(AppError::Internal("password verification failed".to_string()))
    })?;
    if !verified {
        return Err(AppError::Validation("Aktuelles Passwort ist falsch".to_string()).into());
    }

    check_password_length(&payload.new_password, state.security.min_password_length)?;

    let hash = hash_password(&payload.new_password).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ApiError(AppError::Internal("password hashing failed".to_string()))
    })?;
    users.update_password(&user.id, &hash).await?;

    audit
        .append(
            "password_changed",
            Some(&user.username),
            "user",
            Some(&user.id),
            None,
            None,
        )
        .await?;
    info!(username = %user.username, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_map(forwarded: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = forwarded {
            headers.insert("x-forwarded-for", value.parse().unwrap());
        }
        headers
    }

    fn peer() -> SocketAddr {
        "192.0.2.10:52831".parse().unwrap()
    }

    #[test]
    fn test_source_address_prefers_forwarded_header() {
        let headers = header_map(Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(source_address(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn test_source_address_falls_back_to_peer() {
        assert_eq!(source_address(&header_map(None), peer()), "192.0.2.10");
        assert_eq!(source_address(&header_map(Some("")), peer()), "192.0.2.10");
    }

    #[test]
    fn test_check_password_length() {
        assert!(check_password_length("kurz", 8).is_err());
        assert!(check_password_length("genau8ch", 8).is_ok());
    }
}
