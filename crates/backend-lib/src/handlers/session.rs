// ============================
// crates/backend-lib/src/handlers/session.rs
// ============================
//! Login plus the refresh-token lifecycle.
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chirpy_common::{LoginRequest, LoginResponse, TokenResponse};
use chrono::Utc;
use metrics::counter;
use tracing::{debug, info, instrument};

use crate::{
    auth::{extract_bearer, generate_refresh_token, refresh_token_ttl, AuthError},
    error::AppError,
    metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED},
    AppState,
};

/// `POST /api/login`
///
/// Unknown email and wrong password produce the same response and cost the
/// same hashing work.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = payload?;

    let user = state.storage.get_user_by_email(&request.email).await?;
    let stored = user.as_ref().map(|u| u.hashed_password.clone());

    let verified = state
        .hasher
        .verify_user_blocking(request.password, stored)
        .await;
    let user = match (verified, user) {
        (Ok(()), Some(user)) => user,
        (Err(AuthError::Hashing(detail)), _) => {
            return Err(AuthError::Hashing(detail).into());
        },
        (_, found) => {
            counter!(LOGIN_FAILED).increment(1);
            debug!(account_exists = found.is_some(), "login rejected");
            return Err(AppError::Unauthorized);
        },
    };

    let token = state
        .gate
        .codec()
        .issue(user.id, request.expires_in_seconds)
        .map_err(AuthError::from)?;

    let refresh_token = generate_refresh_token();
    state
        .storage
        .create_refresh_token(&refresh_token, user.id, Utc::now() + refresh_token_ttl())
        .await?;

    counter!(LOGIN_SUCCEEDED).increment(1);
    info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    }))
}

/// `POST /api/refresh`: trade an active refresh token for a new access token
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let presented = extract_bearer(&headers).map_err(AuthError::from)?;

    let record = state
        .storage
        .get_refresh_token(presented)
        .await?
        .filter(|record| record.is_active(Utc::now()))
        .ok_or_else(|| {
            debug!("refresh token unknown, revoked or expired");
            AppError::Unauthorized
        })?;

    let token = state
        .gate
        .codec()
        .issue(record.user_id, None)
        .map_err(AuthError::from)?;

    Ok(Json(TokenResponse { token }))
}

/// `POST /api/revoke`
#[instrument(skip_all)]
pub async fn revoke(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let presented = extract_bearer(&headers).map_err(AuthError::from)?;

    state
        .storage
        .revoke_refresh_token(presented, Utc::now())
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized,
            other => other,
        })?;

    info!("refresh token revoked");
    Ok(StatusCode::NO_CONTENT)
}
