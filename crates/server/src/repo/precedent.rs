use shared_types::{AppError, Precedent};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, citation, title, court, jurisdiction, decided_year, summary";

/// Every precedent, for (re)building the search index.
pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<Precedent>, AppError> {
    sqlx::query_as::<_, Precedent>(&format!(
        "SELECT {COLUMNS} FROM precedents ORDER BY decided_year DESC, citation"
    ))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Precedent, AppError> {
    sqlx::query_as::<_, Precedent>(&format!("SELECT {COLUMNS} FROM precedents WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?
        .ok_or_else(|| AppError::not_found("Precedent not found"))
}

/// Distinct jurisdictions, alphabetically.
pub async fn list_jurisdictions(pool: &Pool<Postgres>) -> Result<Vec<String>, AppError> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT jurisdiction FROM precedents ORDER BY jurisdiction")
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
