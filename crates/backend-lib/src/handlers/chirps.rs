// ============================
// crates/backend-lib/src/handlers/chirps.rs
// ============================
//! Chirp creation, listing and deletion.
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chirpy_common::{ChirpResponse, CreateChirpRequest};
use metrics::counter;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::AppError,
    metrics::{CHIRP_CREATED, CHIRP_DELETED},
    validation::{parse_author_id, validate_chirp},
    AppState,
};

/// Query string of `GET /api/chirps`
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

/// `POST /api/chirps`
#[instrument(skip_all, fields(user_id = %identity))]
pub async fn create_chirp(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<CreateChirpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChirpResponse>), AppError> {
    let Json(request) = payload?;
    let body = validate_chirp(&request.body)?;

    let chirp = state
        .storage
        .create_chirp(identity, &body)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized,
            other => other,
        })?;

    counter!(CHIRP_CREATED).increment(1);
    info!(chirp_id = %chirp.id, "chirp created");

    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// `GET /api/chirps?author_id=<uuid>&sort=asc|desc`
pub async fn list_chirps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<Json<Vec<ChirpResponse>>, AppError> {
    let author = parse_author_id(query.author_id.as_deref())?;

    let mut chirps = state.storage.list_chirps(author).await?;
    if query
        .sort
        .as_deref()
        .is_some_and(|sort| sort.eq_ignore_ascii_case("desc"))
    {
        chirps.reverse();
    }

    Ok(Json(chirps.into_iter().map(ChirpResponse::from).collect()))
}

/// `GET /api/chirps/{id}`
pub async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChirpResponse>, AppError> {
    state
        .storage
        .get_chirp(id)
        .await?
        .map(|chirp| Json(chirp.into()))
        .ok_or_else(|| AppError::NotFound("chirp".to_string()))
}

/// `DELETE /api/chirps/{id}`: owner only; a missing chirp is 404 for everyone
#[instrument(skip_all, fields(user_id = %identity, chirp_id = %id))]
pub async fn delete_chirp(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let found = state.storage.get_chirp(id).await?;
    let chirp = state.gate.authorize_resource(identity, found)?;

    state.storage.delete_chirp(chirp.id).await?;

    counter!(CHIRP_DELETED).increment(1);
    info!("chirp deleted");
    Ok(StatusCode::NO_CONTENT)
}
