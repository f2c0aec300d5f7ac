use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ErrorDetail;

/// Detail returned when a fetch or update references a missing todo.
pub const TODO_NOT_FOUND: &str = "Todo not found";
/// Detail returned when a delete references a missing todo.
pub const TODO_ID_NOT_FOUND: &str = "Todo ID not found";

/// Application error type for web handlers.
///
/// Every variant renders as `{"detail": ...}`.
#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
    Validation(String),
    /// The body could not be read at all (too large, connection dropped).
    /// Carries the status axum chose for the rejection.
    Body(StatusCode, String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Body(status, msg) => (status, msg),
            AppError::Internal(msg) => {
                // Log the cause, keep it out of the response.
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(_) => {
                AppError::Body(rejection.status(), rejection.body_text())
            }
            _ => AppError::Validation(rejection.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
