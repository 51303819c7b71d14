// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router for the Chirpy server.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{admin, chirps, session, users, webhooks};
use crate::middleware::count_hits;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let file_server = Router::new()
        .nest_service("/app", ServeDir::new(&state.settings.filepath_root))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    Router::new()
        .route("/api/healthz", get(admin::healthz))
        .route("/api/users", post(users::create_user).put(users::update_user))
        .route("/api/login", post(session::login))
        .route("/api/refresh", post(session::refresh))
        .route("/api/revoke", post(session::revoke))
        .route("/api/chirps", post(chirps::create_chirp).get(chirps::list_chirps))
        .route(
            "/api/chirps/{id}",
            get(chirps::get_chirp).delete(chirps::delete_chirp),
        )
        .route("/api/polka/webhooks", post(webhooks::polka_webhook))
        .route("/admin/metrics", get(admin::metrics_page))
        .route("/admin/reset", post(admin::reset))
        .merge(file_server)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
