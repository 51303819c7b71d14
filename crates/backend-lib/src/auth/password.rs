// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are scrypt PHC strings (`$scrypt$ln=..,r=..,p=..$salt$hash`), so the
//! parameters used at registration travel with the stored credential.
use std::sync::{Arc, OnceLock};

use scrypt::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use tracing::warn;
use zeroize::Zeroizing;

use super::AuthError;

/// Salt size in bytes
const SALT_BYTES: usize = 16;

/// One-way hashing of user passwords
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
    /// Hash compared against when the account does not exist
    decoy: Arc<OnceLock<String>>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("log_n", &self.params.log_n())
            .field("r", &self.params.r())
            .field("p", &self.params.p())
            .finish()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(Params::recommended())
    }
}

impl CredentialHasher {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    /// Build a hasher from raw scrypt cost parameters
    pub fn from_cost(log_n: u8, r: u32, p: u32) -> Result<Self, AuthError> {
        let params = Params::new(log_n, r, p, Params::RECOMMENDED_LEN)
            .map_err(|e| AuthError::Hashing(format!("invalid scrypt parameters: {e}")))?;
        Ok(Self::new(params))
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, AuthError> {
        let salt_bytes: [u8; SALT_BYTES] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// A malformed stored hash is reported as a mismatch, never as a fault.
    pub fn verify(&self, plain: &str, hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::CredentialMismatch)?;
        Scrypt
            .verify_password(plain.as_bytes(), &parsed)
            .map_err(|_| AuthError::CredentialMismatch)
    }

    /// Verify a login attempt against an account that may not exist.
    ///
    /// A missing account still pays for one full verification.
    pub fn verify_user(&self, plain: &str, stored: Option<&str>) -> Result<(), AuthError> {
        match stored {
            Some(hash) => self.verify(plain, hash),
            None => {
                let _ = self.verify(plain, self.decoy_hash());
                Err(AuthError::CredentialMismatch)
            },
        }
    }

    /// Hash on the blocking pool; the plaintext is zeroized afterwards
    pub async fn hash_blocking(&self, plain: String) -> Result<String, AuthError> {
        let hasher = self.clone();
        let plain = Zeroizing::new(plain);
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    /// `verify_user` on the blocking pool; the plaintext is zeroized afterwards
    pub async fn verify_user_blocking(
        &self,
        plain: String,
        stored: Option<String>,
    ) -> Result<(), AuthError> {
        let hasher = self.clone();
        let plain = Zeroizing::new(plain);
        tokio::task::spawn_blocking(move || hasher.verify_user(&plain, stored.as_deref()))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    fn decoy_hash(&self) -> &str {
        self.decoy.get_or_init(|| {
            let secret: [u8; SALT_BYTES] = rand::random();
            let plain = Zeroizing::new(format!("{secret:?}"));
            self.hash(&plain).unwrap_or_else(|e| {
                warn!(error = %e, "failed to build decoy password hash");
                String::new()
            })
        })
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> CredentialHasher {
    CredentialHasher::from_cost(4, 8, 1).unwrap()
}
