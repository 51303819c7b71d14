use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use metrics::counter;

use crate::metrics::FILESERVER_HITS;
use crate::AppState;

/// Count every request that reaches the static file server
pub async fn count_hits(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    counter!(FILESERVER_HITS).increment(1);

    next.run(request).await
}
