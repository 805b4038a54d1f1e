use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::instrument;

use crate::domain::repository::CredentialService;
use crate::error::ShopError;

/// Argon2id credentials with a fresh random salt per hash. Digests are PHC strings, so
/// verification reads the parameters back from the digest itself.
#[derive(Clone)]
pub struct Argon2Credentials {
    params: Params,
    decoy: String,
}

impl Default for Argon2Credentials {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl Argon2Credentials {
    /// Custom cost parameters. Tests use this to keep hashing cheap.
    pub fn with_params(params: Params) -> Self {
        let decoy = decoy_digest_for(&params);
        Self { params, decoy }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// PHC string carrying `params` with a fixed salt and an all-zero output. No password
/// hashes to zero bytes, but verifying still runs the full argon2 computation.
fn decoy_digest_for(params: &Params) -> String {
    format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        params.m_cost(),
        params.t_cost(),
        params.p_cost(),
        "c29tZXNhbHRzb21lc2FsdA",
        "A".repeat(43),
    )
}

impl CredentialService for Argon2Credentials {
    #[instrument(name = "credentials::hash", skip_all)]
    fn hash(&self, password: &str) -> Result<String, ShopError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        Ok(digest.to_string())
    }

    #[instrument(name = "credentials::verify", skip_all)]
    fn verify(&self, password: &str, digest: &str) -> Result<bool, ShopError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| anyhow::anyhow!("parse stored digest: {e}"))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow::anyhow!("verify password: {e}").into()),
        }
    }

    fn decoy_digest(&self) -> &str {
        &self.decoy
    }
}
