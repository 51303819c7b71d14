// ============================
// crates/backend-lib/src/auth/gate.rs
// ============================
//! Per-request authentication and per-resource authorization.
//!
//! Every check either yields the caller's identity or a rejection. A
//! rejection is final: callers return it immediately without touching state.
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use metrics::counter;
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use super::header::{extract_bearer, extract_service_key};
use super::token::TokenCodec;
use super::{AuthError, Identity};
use crate::metrics::AUTH_REJECTED;

/// A resource owned by exactly one identity, fixed at creation
pub trait Owned {
    fn owner(&self) -> Identity;
}

/// Composes header parsing, token validation and ownership checks
pub struct AuthGate {
    codec: TokenCodec,
    service_key: Zeroizing<String>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("codec", &self.codec)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl AuthGate {
    pub fn new(codec: TokenCodec, service_key: impl Into<String>) -> Self {
        Self {
            codec,
            service_key: Zeroizing::new(service_key.into()),
        }
    }

    /// Token codec used for issuing login tokens
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Resolve the session identity from `Authorization: Bearer <token>`
    pub fn authenticate_user(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        self.authenticate_user_at(headers, Utc::now())
    }

    pub fn authenticate_user_at(
        &self,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthError> {
        let token = extract_bearer(headers).map_err(|e| reject(AuthError::Header(e)))?;
        self.codec
            .validate_at(token, now)
            .map_err(|e| reject(AuthError::Token(e)))
    }

    /// Allow only the resource owner
    pub fn authorize_owner(&self, identity: Identity, owner: Identity) -> Result<(), AuthError> {
        if identity == owner {
            Ok(())
        } else {
            debug!(%identity, %owner, "ownership check failed");
            Err(AuthError::Forbidden)
        }
    }

    /// Ownership check for a looked-up resource.
    ///
    /// A missing resource is `NotFound` before any owner comparison happens.
    pub fn authorize_resource<R: Owned>(
        &self,
        identity: Identity,
        resource: Option<R>,
    ) -> Result<R, AuthError> {
        let resource = resource.ok_or(AuthError::NotFound)?;
        self.authorize_owner(identity, resource.owner())?;
        Ok(resource)
    }

    /// Accept only `Authorization: ApiKey <configured key>`
    pub fn authenticate_service(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let provided = extract_service_key(headers).map_err(|e| reject(AuthError::Header(e)))?;
        if ct_eq(provided.as_bytes(), self.service_key.as_bytes()) {
            Ok(())
        } else {
            Err(reject(AuthError::CredentialMismatch))
        }
    }
}

fn reject(err: AuthError) -> AuthError {
    debug!(reason = err.reason(), error = %err, "authentication rejected");
    counter!(AUTH_REJECTED, "reason" => err.reason()).increment(1);
    err
}

/// Constant-time comparison of two byte slices
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.ct_eq(b).into()
}
