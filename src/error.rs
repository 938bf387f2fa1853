/*
 * Responsibility
 * - Shared AppError definition for every HTTP-facing failure
 * - IntoResponse mapping (status + fixed JSON body)
 * - Internal detail stays in logs, never on the wire
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public failure body: `{"detail": "...", "status_code": n}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: &'static str,
    pub status_code: u16,
}

impl ErrorBody {
    pub fn new(detail: &'static str, status: StatusCode) -> Self {
        Self {
            detail,
            status_code: status.as_u16(),
        }
    }

    /// Body used for every deny decision. The reason text is constant; callers
    /// discriminate on `status_code`.
    pub fn denied(status: StatusCode) -> Self {
        Self::new("Not Found", status)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("route not found")]
    RouteNotFound,
    #[error("request body unavailable: {0}")]
    BodyUnavailable(String),
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn body_unavailable(message: impl Into<String>) -> Self {
        Self::BodyUnavailable(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::BodyUnavailable(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            AppError::RouteNotFound => "Not Found",
            AppError::BodyUnavailable(_) | AppError::Internal => "Internal Server Error",
            AppError::Timeout => "Request Timeout",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(ErrorBody::new(self.detail(), status))).into_response()
    }
}
