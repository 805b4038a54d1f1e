use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use bookstore_auth_types::token::TokenService;

use crate::infra::credential::Argon2Credentials;
use crate::infra::db::{DbAccountRepository, DbBookRepository, DbOrderRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// Everything here is read-only after startup; the store is the only shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenService,
    pub credentials: Argon2Credentials,
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }
}
