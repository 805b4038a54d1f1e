//! Signed session tokens (HS256 JWT).

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;

/// Token lifetime in seconds (1 hour). Fixed; there is no refresh.
pub const TOKEN_TTL_SECS: u64 = 3600;

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | account id, decimal string |
/// | `role` | custom | `"user"` or `"admin"` |
/// | `iat` | `iat` | issue time, seconds since epoch |
/// | `exp` | `exp` | expiry, `iat + TOKEN_TTL_SECS` |
///
/// The role is captured at issuance. A role change takes effect only after the account
/// logs in again.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

/// Identity resolved from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub account_id: AccountId,
    pub role: Role,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// The only verification failure callers see. Wrong key, expiry and malformed input are
/// deliberately indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

#[derive(Debug, thiserror::Error)]
#[error("failed to sign token")]
pub struct SignError(#[from] jsonwebtoken::errors::Error);

/// Internal classification, logged at debug level only.
#[derive(Debug)]
enum Rejection {
    Signature,
    Expired,
    Malformed,
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// Issues and verifies session tokens.
///
/// Built once from the configured secret; cloning shares the same immutable keys.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        // Expiry is compared against an explicit instant in `verify_at`, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    pub fn issue(&self, account_id: AccountId, role: Role) -> Result<IssuedToken, SignError> {
        self.issue_at(account_id, role, now_secs())
    }

    pub fn issue_at(
        &self,
        account_id: AccountId,
        role: Role,
        issued_at: u64,
    ) -> Result<IssuedToken, SignError> {
        let exp = issued_at + TOKEN_TTL_SECS;
        let claims = TokenClaims {
            sub: account_id.to_string(),
            role,
            iat: issued_at,
            exp,
        };
        let token = encode(&Header::default(), &claims, &self.keys.encoding)?;
        Ok(IssuedToken {
            token,
            expires_at: exp,
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenInfo, InvalidToken> {
        self.verify_at(token, now_secs())
    }

    /// Verify as of `now` (seconds since epoch). Accepted while `now < exp`.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<TokenInfo, InvalidToken> {
        self.check(token, now).map_err(|reason| {
            tracing::debug!(?reason, "token rejected");
            InvalidToken
        })
    }

    fn check(&self, token: &str, now: u64) -> Result<TokenInfo, Rejection> {
        let data = decode::<TokenClaims>(token, &self.keys.decoding, &self.keys.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => Rejection::Signature,
                _ => Rejection::Malformed,
            })?;
        let claims = data.claims;

        if now >= claims.exp {
            return Err(Rejection::Expired);
        }
        let account_id = claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| Rejection::Malformed)?;

        Ok(TokenInfo {
            account_id,
            role: claims.role,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
