use tracing::{info, warn};

use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

use crate::config::AdminSeed;
use crate::domain::repository::{AccountRepository, CredentialService};
use crate::domain::types::NewAccount;
use crate::error::ShopError;

#[derive(Debug, PartialEq, Eq)]
pub enum EnsureAdminOutcome {
    Created(AccountId),
    AlreadyAdmin(AccountId),
    /// The email belongs to a regular account. It is left untouched.
    NotAdmin(AccountId),
}

/// Make sure the configured admin account exists. No HTTP route can create admins.
pub struct EnsureAdminUseCase<R: AccountRepository, C: CredentialService> {
    pub repo: R,
    pub credentials: C,
}

impl<R: AccountRepository, C: CredentialService> EnsureAdminUseCase<R, C> {
    pub async fn execute(&self, seed: &AdminSeed) -> Result<EnsureAdminOutcome, ShopError> {
        if let Some(existing) = self.repo.find_by_email(&seed.email).await? {
            return Ok(if existing.role.is_admin() {
                info!(account_id = %existing.id, "admin account present");
                EnsureAdminOutcome::AlreadyAdmin(existing.id)
            } else {
                warn!(account_id = %existing.id, "configured admin email belongs to a non-admin account");
                EnsureAdminOutcome::NotAdmin(existing.id)
            });
        }

        let password_hash = self.credentials.hash(&seed.password)?;
        let id = self
            .repo
            .create(&NewAccount {
                name: seed.name.clone(),
                email: seed.email.clone(),
                password_hash,
                role: Role::Admin,
            })
            .await?;
        info!(account_id = %id, "admin account created");
        Ok(EnsureAdminOutcome::Created(id))
    }
}
