use tracing::instrument;

use bookstore_auth_types::token::{IssuedToken, TokenService};
use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

use crate::domain::repository::{AccountRepository, CredentialService};
use crate::domain::types::{Account, NewAccount};
use crate::error::ShopError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: AccountRepository, C: CredentialService> {
    pub repo: R,
    pub credentials: C,
}

impl<R: AccountRepository, C: CredentialService> RegisterUseCase<R, C> {
    /// New accounts always get [`Role::User`]; callers cannot pick a role.
    #[instrument(skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: RegisterInput) -> Result<AccountId, ShopError> {
        let name = input.name.trim();
        let email = input.email.trim();
        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(ShopError::MissingData);
        }
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(ShopError::EmailAlreadyRegistered);
        }
        let password_hash = self.credentials.hash(&input.password)?;
        // A concurrent registration can still lose the race; the unique index reports it.
        self.repo
            .create(&NewAccount {
                name: name.to_owned(),
                email: email.to_owned(),
                password_hash,
                role: Role::User,
            })
            .await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginOutput {
    pub token: IssuedToken,
    pub account: Account,
}

/// Look up and check a credential pair. `None` covers both unknown email and wrong password.
async fn authenticate<R: AccountRepository, C: CredentialService>(
    repo: &R,
    credentials: &C,
    input: &LoginInput,
) -> Result<Option<Account>, ShopError> {
    let Some(account) = repo.find_by_email(input.email.trim()).await? else {
        // Pay the same verification cost as a wrong password.
        let _ = credentials.verify(&input.password, credentials.decoy_digest());
        return Ok(None);
    };
    if credentials.verify(&input.password, &account.password_hash)? {
        Ok(Some(account))
    } else {
        Ok(None)
    }
}

fn issue(tokens: &TokenService, account: &Account) -> Result<IssuedToken, ShopError> {
    tokens
        .issue(account.id, account.role)
        .map_err(|e| ShopError::Internal(e.into()))
}

pub struct LoginUseCase<R: AccountRepository, C: CredentialService> {
    pub repo: R,
    pub credentials: C,
    pub tokens: TokenService,
}

impl<R: AccountRepository, C: CredentialService> LoginUseCase<R, C> {
    #[instrument(skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ShopError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ShopError::MissingData);
        }
        let account = authenticate(&self.repo, &self.credentials, &input)
            .await?
            .ok_or(ShopError::InvalidCredentials)?;
        let token = issue(&self.tokens, &account)?;
        Ok(LoginOutput { token, account })
    }
}

// ── AdminLogin ───────────────────────────────────────────────────────────────

pub struct AdminLoginUseCase<R: AccountRepository, C: CredentialService> {
    pub repo: R,
    pub credentials: C,
    pub tokens: TokenService,
}

impl<R: AccountRepository, C: CredentialService> AdminLoginUseCase<R, C> {
    /// Unlike [`LoginUseCase`], a correct pair on a non-admin account is reported as
    /// [`ShopError::Forbidden`]. The role is only checked after the password matches.
    #[instrument(skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ShopError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ShopError::MissingData);
        }
        let account = authenticate(&self.repo, &self.credentials, &input)
            .await?
            .ok_or(ShopError::InvalidAdminCredentials)?;
        if !account.role.is_admin() {
            return Err(ShopError::Forbidden);
        }
        let token = issue(&self.tokens, &account)?;
        Ok(LoginOutput { token, account })
    }
}
