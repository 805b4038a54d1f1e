//! Mock auth helpers for integration tests.
//!
//! `MockAuth` mints real signed tokens with [`TEST_JWT_SECRET`], so a router built with
//! [`test_token_service`] accepts them through the normal guard.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};

use bookstore_auth_types::token::TokenService;
use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Token service keyed with [`TEST_JWT_SECRET`].
pub fn test_token_service() -> TokenService {
    TokenService::new(TEST_JWT_SECRET.as_bytes())
}

/// Configurable identity presented by test requests.
pub struct MockAuth {
    pub account_id: AccountId,
    pub role: Role,
}

impl MockAuth {
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn user(account_id: i32) -> Self {
        Self::new(AccountId(account_id), Role::User)
    }

    pub fn admin(account_id: i32) -> Self {
        Self::new(AccountId(account_id), Role::Admin)
    }

    /// A raw token signed with the test secret.
    pub fn token(&self) -> String {
        test_token_service()
            .issue(self.account_id, self.role)
            .expect("sign test token")
            .token
    }

    /// `Bearer <token>` header value.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).expect("ascii token")
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer());
        map
    }
}
