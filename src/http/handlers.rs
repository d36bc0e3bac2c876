use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /posts`
pub async fn list_posts(State(state): State<AppState>) -> Response {
    let start_time = Instant::now();

    match state.listing.list().await {
        Ok(posts) => {
            tracing::debug!(count = posts.len(), "Post listing built");
            metrics::record_request("posts", 200, start_time);
            (StatusCode::OK, Json(posts)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Post listing failed");
            metrics::record_request("posts", 502, start_time);
            (StatusCode::BAD_GATEWAY, format!("User service lookup failed: {}", e)).into_response()
        }
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
