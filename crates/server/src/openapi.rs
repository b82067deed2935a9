use axum::Router;
use shared_types::{AppError, AppErrorKind, Precedent, PrecedentHit, UploadedDocument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI document for the REST surface.
#[derive(OpenApi)]
#[openapi(
    info(title = "Counselor API", description = "Legal research assistant"),
    paths(
        health::health_check,
        rest::precedent::search_precedents,
        rest::precedent::get_precedent,
        rest::document::list_documents,
        rest::document::download_document,
    ),
    components(schemas(
        AppError,
        AppErrorKind,
        Precedent,
        PrecedentHit,
        UploadedDocument,
        health::HealthResponse,
    )),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "precedents", description = "Precedent search"),
        (name = "documents", description = "Uploaded documents"),
    )
)]
pub struct ApiDoc;

/// REST routes, `/health` and the Scalar UI at `/docs`, ready to merge
/// into the Dioxus router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
