// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Stateless session tokens.
//!
//! Access tokens are HS256 JWTs carrying `{iss, sub, iat, exp}`. Nothing is
//! stored server-side: a token is valid while its signature verifies under
//! the configured secret and the clock is before `exp`.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Identity;

/// Issuer embedded in, and required of, every access token
pub const TOKEN_ISSUER: &str = "chirpy";

/// Lifetime used when the caller asks for none or for an out-of-range one
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Longest lifetime a caller may request
pub const MAX_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Why a token was refused. Only ever logged, never shown to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token expired")]
    Expired,

    #[error("invalid token signature")]
    Signature,

    #[error("invalid token subject")]
    Subject,

    #[error("unexpected token issuer")]
    Issuer,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Short label for logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed(_) => "malformed",
            TokenError::Expired => "expired",
            TokenError::Signature => "signature",
            TokenError::Subject => "subject",
            TokenError::Issuer => "issuer",
            TokenError::Signing(_) => "signing",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::Signature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidIssuer => TokenError::Issuer,
            ErrorKind::InvalidSubject => TokenError::Subject,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Registered claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Clamp a requested lifetime to `(0, MAX_TOKEN_TTL_SECS]`, defaulting otherwise
pub fn clamp_ttl(requested_secs: Option<i64>) -> Duration {
    let secs = match requested_secs {
        Some(secs) if secs > 0 && secs <= MAX_TOKEN_TTL_SECS => secs,
        _ => DEFAULT_TOKEN_TTL_SECS,
    };
    Duration::seconds(secs)
}

/// Issues and validates access tokens under one symmetric secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &"HS256")
            .field("issuer", &TOKEN_ISSUER)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked against the caller's clock in `claims_at`
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[TOKEN_ISSUER]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for `identity` with a clamped lifetime starting now
    pub fn issue(&self, identity: Identity, ttl_secs: Option<i64>) -> Result<String, TokenError> {
        self.issue_at(identity, ttl_secs, Utc::now())
    }

    pub fn issue_at(
        &self,
        identity: Identity,
        ttl_secs: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: (now + clamp_ttl(ttl_secs)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let claims = self.claims_at(token, now)?;
        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Subject)
    }

    /// Verify signature, issuer and expiry, returning the raw claims
    pub fn claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}
