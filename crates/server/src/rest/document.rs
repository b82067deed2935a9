use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::{sanitize_file_name, AppError, UploadedDocument};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::extractors::AuthRequired;
use crate::storage::{document_store, ObjectStore};

/// GET /api/v1/documents
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    responses(
        (status = 200, description = "The caller's documents, newest first", body = Vec<UploadedDocument>),
        (status = 401, description = "Authentication required", body = AppError)
    ),
    tag = "documents"
)]
pub async fn list_documents(
    AuthRequired(claims): AuthRequired,
    State(pool): State<Pool<Postgres>>,
) -> Result<Json<Vec<UploadedDocument>>, AppError> {
    let documents = crate::repo::document::list_by_user(&pool, claims.sub).await?;
    Ok(Json(documents))
}

/// `Content-Disposition` value offering the stored bytes as a download.
pub fn attachment_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", sanitize_file_name(file_name))
}

/// GET /api/v1/documents/{id}/content
#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}/content",
    params(("id" = Uuid, Path, description = "Document id")),
    responses(
        (status = 200, description = "The stored bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 401, description = "Authentication required", body = AppError),
        (status = 404, description = "No such document for this caller", body = AppError)
    ),
    tag = "documents"
)]
pub async fn download_document(
    AuthRequired(claims): AuthRequired,
    State(pool): State<Pool<Postgres>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let stored = crate::repo::document::find_stored(&pool, claims.sub, id).await?;
    let bytes = document_store().await?.get(&stored.storage_key).await?;
    tracing::info!(user_id = claims.sub, document = %id, size = bytes.len(), "document downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, stored.content_type),
            (header::CONTENT_DISPOSITION, attachment_disposition(&stored.file_name)),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn disposition_uses_a_header_safe_name() {
        assert_eq!(
            attachment_disposition("Brief \"final\".pdf"),
            "attachment; filename=\"Brief__final_.pdf\""
        );
        assert_eq!(
            attachment_disposition("../../notes.txt"),
            "attachment; filename=\"notes.txt\""
        );
    }
}
