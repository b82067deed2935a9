use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared_types::{AppError, Precedent, PrecedentHit, PrecedentQuery};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::extractors::AuthRequired;
use crate::precedent_index::PrecedentIndex;

/// GET /api/v1/precedents/search
#[utoipa::path(
    get,
    path = "/api/v1/precedents/search",
    params(PrecedentQuery),
    responses(
        (status = 200, description = "Ranked precedent hits", body = Vec<PrecedentHit>),
        (status = 401, description = "Authentication required", body = AppError)
    ),
    tag = "precedents"
)]
pub async fn search_precedents(
    AuthRequired(_claims): AuthRequired,
    State(index): State<Arc<PrecedentIndex>>,
    Query(query): Query<PrecedentQuery>,
) -> Json<Vec<PrecedentHit>> {
    Json(index.search(&query))
}

/// GET /api/v1/precedents/{id}
#[utoipa::path(
    get,
    path = "/api/v1/precedents/{id}",
    params(("id" = Uuid, Path, description = "Precedent id")),
    responses(
        (status = 200, description = "The precedent", body = Precedent),
        (status = 401, description = "Authentication required", body = AppError),
        (status = 404, description = "No such precedent", body = AppError)
    ),
    tag = "precedents"
)]
pub async fn get_precedent(
    AuthRequired(_claims): AuthRequired,
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Precedent>, AppError> {
    let precedent = crate::repo::precedent::find_by_id(&pool, id).await?;
    Ok(Json(precedent))
}
