// ============================
// crates/backend-lib/src/handlers/admin.rs
// ============================
//! Health, metrics page and the development reset.
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use chirpy_common::MessageResponse;
use tracing::{info, warn};

use crate::{error::AppError, AppState};

/// Readiness probe
pub async fn healthz() -> &'static str {
    "OK"
}

/// Admin page showing how often the file server was hit
pub async fn metrics_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let hits = state.hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {hits} times!</p>\n  </body>\n</html>"
    ))
}

/// Wipe all users and reset the hit counter. Only allowed on `dev`.
pub async fn reset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.settings.is_dev() {
        warn!(platform = %state.settings.platform, "reset refused outside dev");
        return Err(AppError::Forbidden);
    }

    state.storage.delete_all_users().await?;
    state.hits.store(0, Ordering::Relaxed);
    info!("all users deleted and hit counter reset");

    Ok(Json(MessageResponse {
        message: "All users deleted".to_string(),
    }))
}
