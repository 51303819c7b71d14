// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! Account registration and credential updates.
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chirpy_common::{CreateUserRequest, UpdateUserRequest, UserResponse};
use metrics::counter;
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::AppError,
    metrics::USER_CREATED,
    validation::{validate_email, validate_password},
    AppState,
};

/// `POST /api/users`
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(request) = payload?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let hashed = state.hasher.hash_blocking(request.password).await?;
    let user = state.storage.create_user(&request.email, &hashed).await?;

    counter!(USER_CREATED).increment(1);
    info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `PUT /api/users`: replace the caller's email and password wholesale
#[instrument(skip_all, fields(user_id = %identity))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(request) = payload?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    // A valid token for a deleted account is still unauthorized
    if state.storage.get_user_by_id(identity).await?.is_none() {
        return Err(AppError::Unauthorized);
    }

    let hashed = state.hasher.hash_blocking(request.password).await?;
    let user = state
        .storage
        .update_user(identity, &request.email, &hashed)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized,
            other => other,
        })?;

    info!("user credentials updated");
    Ok(Json(user.into()))
}
