// ============================
// crates/backend-lib/src/handlers/webhooks.rs
// ============================
//! Billing provider webhook.
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chirpy_common::{WebhookRequest, USER_UPGRADED_EVENT};
use metrics::counter;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{auth::ServiceCaller, error::AppError, metrics::WEBHOOK_UPGRADED, AppState};

/// `POST /api/polka/webhooks`
#[instrument(skip_all)]
pub async fn polka_webhook(
    State(state): State<Arc<AppState>>,
    _caller: ServiceCaller,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;

    if request.event != USER_UPGRADED_EVENT {
        debug!(event = %request.event, "ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = Uuid::parse_str(&request.data.user_id)
        .map_err(|_| AppError::InvalidInput("invalid user_id".to_string()))?;

    state.storage.upgrade_user(user_id).await?;

    counter!(WEBHOOK_UPGRADED).increment(1);
    info!(%user_id, "user upgraded to Chirpy Red");
    Ok(StatusCode::NO_CONTENT)
}
