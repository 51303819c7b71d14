//! axum extractors that run the auth gate before a handler body executes.
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::Identity;
use crate::{error::AppError, AppState};

/// The authenticated end user of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.gate.authenticate_user(&parts.headers)?;
        Ok(AuthUser(identity))
    }
}

/// Marker for a request carrying the configured service key
#[derive(Debug, Clone, Copy)]
pub struct ServiceCaller;

impl FromRequestParts<Arc<AppState>> for ServiceCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state.gate.authenticate_service(&parts.headers)?;
        Ok(ServiceCaller)
    }
}
