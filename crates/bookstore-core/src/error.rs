use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Stable error body: clients branch on `kind`, `message` is for humans.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub kind: &'a str,
    pub message: String,
}

/// Render an error body with the given status. Every service error type funnels through here
/// so that all failures share one shape.
pub fn error_response(status: StatusCode, kind: &str, message: String) -> Response {
    (status, axum::Json(ErrorBody { kind, message })).into_response()
}

/// Errors raised outside any service's own domain: the authorization guard and
/// unmatched routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Missing, malformed, tampered or expired token. The cause is never reported.
    #[error("unauthorized")]
    Unauthorized,
    /// Valid token, insufficient role.
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.kind(), self.to_string())
    }
}

/// Router fallback for unmatched paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
