use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use bookstore_core::error::error_response;

/// Shop service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    /// Body or path could not be decoded. The decoder's detail is logged, never returned.
    #[error("malformed request")]
    MalformedRequest,
    #[error("missing data")]
    MissingData,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("invalid price")]
    InvalidPrice,
    #[error("price does not match catalog")]
    PriceMismatch,
    #[error("total does not match order items")]
    TotalMismatch,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Same kind as [`ShopError::InvalidCredentials`], reported as 401 by admin login.
    #[error("invalid email or password")]
    InvalidAdminCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("book not found")]
    BookNotFound,
    #[error("book is referenced by an order")]
    BookInUse,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ShopError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::PriceMismatch => "PRICE_MISMATCH",
            Self::TotalMismatch => "TOTAL_MISMATCH",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::InvalidCredentials | Self::InvalidAdminCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::BookInUse => "BOOK_IN_USE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest
            | Self::MissingData
            | Self::InvalidQuantity
            | Self::InvalidPrice
            | Self::PriceMismatch
            | Self::TotalMismatch
            | Self::EmailAlreadyRegistered
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidAdminCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BookNotFound => StatusCode::NOT_FOUND,
            Self::BookInUse => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ShopError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected json body");
        Self::MalformedRequest
    }
}

impl From<PathRejection> for ShopError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path");
        Self::MalformedRequest
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
