//! Authorization guard extractors.
//!
//! Handlers take [`Authenticated`] (any valid token) or [`RequireAdmin`] (valid token with
//! the admin role) as arguments; the guard runs before the handler body. The guard never
//! touches the store: role comes from the token claim.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use bookstore_core::error::AppError;
use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

use crate::token::TokenService;

/// Identity resolved from the request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated {
    pub account_id: AccountId,
    pub role: Role,
}

impl Authenticated {
    /// Resolve identity from request headers.
    ///
    /// Missing header, unknown scheme, bad signature and expiry all yield
    /// [`AppError::Unauthorized`].
    pub fn resolve(headers: &HeaderMap, tokens: &TokenService) -> Result<Self, AppError> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(token_from_header)
            .ok_or(AppError::Unauthorized)?;

        let info = tokens.verify(token).map_err(|_| AppError::Unauthorized)?;
        Ok(Self {
            account_id: info.account_id,
            role: info.role,
        })
    }
}

/// Accepts `<scheme> <token>` with any single scheme word (`Bearer` in practice) or a raw
/// token. A lone `Bearer` carries no token.
pub fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((_scheme, rest)) => rest.trim(),
        None if value.eq_ignore_ascii_case("bearer") => return None,
        None => value,
    };
    (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token)
}

impl<S> FromRequestParts<S> for Authenticated
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares `fn -> impl Future + Send`; resolve synchronously and hand back
    // a 'static future so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = Self::resolve(&parts.headers, &TokenService::from_ref(state));
        async move { result }
    }
}

/// An [`Authenticated`] identity whose role is admin. Non-admin tokens get 403.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub Authenticated);

impl<S> FromRequestParts<S> for RequireAdmin
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = Authenticated::resolve(&parts.headers, &TokenService::from_ref(state))
            .and_then(|identity| {
                if identity.role.is_admin() {
                    Ok(Self(identity))
                } else {
                    Err(AppError::Forbidden)
                }
            });
        async move { result }
    }
}
