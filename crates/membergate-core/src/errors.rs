//! Application error type with HTTP response conversion.
//!
//! Every failure that reaches a handler boundary is an [`AppError`]: a
//! status code plus the underlying error. Responses carry a stable
//! machine-readable `code` derived from the status, so clients can branch
//! on `UNAUTHENTICATED` vs `FORBIDDEN` without parsing prose.
//!
//! Server-side failures (5xx) are logged with the real error and answered
//! with a generic message; token or store internals never reach the body.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    /// Missing or unusable credentials. The entry-point outcome.
    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    /// Authenticated but lacking the required role. Never a logout trigger.
    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// Backing store unreachable or timed out. Retryable, distinct from
    /// "no session".
    pub fn unavailable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, err)
    }

    /// Stable code for the response body, keyed off the status class.
    pub fn code(&self) -> &'static str {
        match self.status {
            StatusCode::UNAUTHORIZED => "UNAUTHENTICATED",
            StatusCode::FORBIDDEN => "FORBIDDEN",
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::SERVICE_UNAVAILABLE => "UNAVAILABLE",
            _ => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = %self.error, "request failed");
            match self.status {
                StatusCode::SERVICE_UNAVAILABLE => "temporarily unavailable, retry later",
                _ => "internal server error",
            }
            .to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "code": self.code(),
            "error": message,
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
