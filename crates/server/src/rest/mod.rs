pub mod document;
pub mod precedent;

use std::time::Duration;

use axum::{middleware, routing::get, Router};

use crate::db::AppState;
use crate::rate_limit::{rate_limit_middleware, RateLimitState};

/// REST calls allowed per caller per minute.
const REST_REQUESTS_PER_MINUTE: u32 = 120;

/// Versioned JSON API for scripted clients.
pub fn api_router() -> Router<AppState> {
    let limiter = RateLimitState::new(REST_REQUESTS_PER_MINUTE, Duration::from_secs(60));

    Router::new()
        .route("/api/v1/precedents/search", get(precedent::search_precedents))
        .route("/api/v1/precedents/{id}", get(precedent::get_precedent))
        .route("/api/v1/documents", get(document::list_documents))
        .route("/api/v1/documents/{id}/content", get(document::download_document))
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
}
