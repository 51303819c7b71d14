// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod extract;
pub mod gate;
pub mod header;
pub mod password;
pub mod refresh;
pub mod token;

use thiserror::Error;

pub use extract::{AuthUser, ServiceCaller};
pub use gate::{AuthGate, Owned};
pub use header::{extract_bearer, extract_service_key, HeaderError, API_KEY_PREFIX, BEARER_PREFIX};
pub use password::CredentialHasher;
pub use refresh::{generate_refresh_token, refresh_token_ttl, REFRESH_TOKEN_TTL_DAYS};
pub use token::{
    clamp_ttl, Claims, TokenCodec, TokenError, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS,
    TOKEN_ISSUER,
};

/// Unique, immutable user identifier carried as the token subject
pub type Identity = uuid::Uuid;

/// Authentication and authorization failures.
///
/// `Header`, `Token` and `CredentialMismatch` all reach clients as the same
/// generic "unauthorized"; the variants exist for logs only.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header rejected: {0}")]
    Header(#[from] HeaderError),

    #[error("session token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("invalid credentials")]
    CredentialMismatch,

    #[error("resource not found")]
    NotFound,

    #[error("caller does not own the resource")]
    Forbidden,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Whether this failure collapses to "unauthorized" at the boundary
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::Header(_) | AuthError::Token(_) | AuthError::CredentialMismatch
        )
    }

    /// Short label for logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Header(_) => "header",
            AuthError::Token(e) => e.reason(),
            AuthError::CredentialMismatch => "credentials",
            AuthError::NotFound => "not_found",
            AuthError::Forbidden => "forbidden",
            AuthError::Hashing(_) => "hashing",
        }
    }
}
