//! Error taxonomy for the service.
//!
//! Domain failures answer 200 with `{success: false, message}` so form-driven
//! clients keep their state; authorization and protocol failures use real
//! status codes. Internal errors are logged and answered generically.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} already exists")]
    Duplicate(&'static str),
    #[error("duration must be a positive number of years or semesters")]
    InvalidDuration,
    #[error("period {0} is out of range for this course")]
    PeriodOutOfRange(i32),
    #[error("end time must be after start time")]
    TimeWindowInvalid,
    #[error("subject does not belong to this course")]
    SubjectNotInCourse,
    #[error("subject is taught in a different period")]
    PeriodMismatch,
    #[error("rating must be between 0.5 and 5.0 in half-star steps")]
    InvalidRating,
    #[error("{0}")]
    InvalidTransition(&'static str),
    #[error("permission denied")]
    PermissionDenied,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("missing or invalid credentials")]
    Unauthorized,
    #[error("reset token has expired")]
    TokenExpired,
    #[error("reset token does not match this account")]
    TokenMismatch,
    #[error("passwords do not match")]
    MismatchedPasswords,
    #[error("file is too large")]
    FileTooLarge,
    #[error("unsupported file type")]
    UnsupportedType,
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("{0}")]
    ExternalTransient(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        ServiceError::Internal(err.into())
    }
}

impl ServiceError {
    /// Domain failures are reported inside a successful HTTP exchange; only
    /// protocol and authorization problems get a non-2xx status.
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::PermissionDenied => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StorageUnavailable | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServiceError::Internal(err) => {
                tracing::error!("internal error: {:#}", err);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_failures_use_success_false_with_200() {
        assert_eq!(ServiceError::InvalidRating.status(), StatusCode::OK);
        assert_eq!(ServiceError::PeriodOutOfRange(9).status(), StatusCode::OK);
        assert_eq!(ServiceError::TokenExpired.status(), StatusCode::OK);
    }

    #[test]
    fn authorization_failures_keep_their_status() {
        assert_eq!(
            ServiceError::PermissionDenied.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ServiceError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ServiceError::NotFound("course").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn permission_denied_message_does_not_leak_targets() {
        assert_eq!(ServiceError::PermissionDenied.to_string(), "permission denied");
    }
}
