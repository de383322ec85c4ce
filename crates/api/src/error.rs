//! Error-to-response mapping for route handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use strafenkasse_shared::AppError;

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper rendering an `AppError` as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        // The driver-level detail goes to the log, never to the client.
        error!(error = %err, "Database operation failed");
        Self(AppError::Database("database operation failed".to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({
            "error": self.0.error_code().to_ascii_lowercase(),
            "message": self.0.to_string(),
        });
        if let AppError::RateLimited { remaining_minutes } = &self.0 {
            body["remaining_minutes"] = json!(remaining_minutes);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_carries_remaining_minutes() {
        let err = ApiError(AppError::RateLimited {
            remaining_minutes: 7,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_db_error_hides_detail() {
        let err = ApiError::from(DbErr::Custom("connection refused to 10.0.0.5".to_string()));
        assert!(matches!(err.0, AppError::Database(_)));
        assert!(!err.0.to_string().contains("10.0.0.5"));
    }
}
