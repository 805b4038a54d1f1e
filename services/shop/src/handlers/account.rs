use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use bookstore_auth_types::guard::Authenticated;
use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

use crate::error::ShopError;
use crate::handlers::AppJson;
use crate::state::AppState;
use crate::usecase::account::{
    AdminLoginUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: AccountId,
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ShopError> {
    let usecase = RegisterUseCase {
        repo: state.account_repo(),
        credentials: state.credentials.clone(),
    };
    let id = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "User registered successfully",
        }),
    ))
}

// ── POST /api/login ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(body: LoginRequest) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    /// Seconds since epoch.
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ShopError> {
    let usecase = LoginUseCase {
        repo: state.account_repo(),
        credentials: state.credentials.clone(),
        tokens: state.tokens.clone(),
    };
    let output = usecase.execute(body.into()).await?;
    Ok(Json(TokenResponse {
        token: output.token.token,
        expires_at: output.token.expires_at,
    }))
}

// ── POST /api/admin/login ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub message: &'static str,
    pub token: String,
    pub expires_at: u64,
    pub user: AccountSummary,
}

pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, ShopError> {
    let usecase = AdminLoginUseCase {
        repo: state.account_repo(),
        credentials: state.credentials.clone(),
        tokens: state.tokens.clone(),
    };
    let output = usecase.execute(body.into()).await?;
    Ok(Json(AdminLoginResponse {
        message: "Admin login successful",
        token: output.token.token,
        expires_at: output.token.expires_at,
        user: AccountSummary {
            id: output.account.id,
            name: output.account.name,
            email: output.account.email,
            role: output.account.role,
        },
    }))
}

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: AccountId,
    pub role: Role,
}

/// Echoes the identity resolved by the guard. Does not touch the store.
pub async fn me(identity: Authenticated) -> Json<MeResponse> {
    Json(MeResponse {
        id: identity.account_id,
        role: identity.role,
    })
}
