use shared_types::{AppError, UploadedDocument};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = "id, file_name, content_type, size_bytes, checksum, created_at";

/// Metadata for a new upload. The bytes live in the object store under
/// `storage_key`.
pub struct NewDocument<'a> {
    pub id: Uuid,
    pub user_id: i64,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub checksum: &'a str,
    pub storage_key: &'a str,
}

pub async fn insert(pool: &Pool<Postgres>, doc: &NewDocument<'_>) -> Result<UploadedDocument, AppError> {
    sqlx::query_as::<_, UploadedDocument>(&format!(
        r#"
        INSERT INTO documents (id, user_id, file_name, content_type, size_bytes, checksum, storage_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(doc.id)
    .bind(doc.user_id)
    .bind(doc.file_name)
    .bind(doc.content_type)
    .bind(doc.size_bytes)
    .bind(doc.checksum)
    .bind(doc.storage_key)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// The user's documents, newest first.
pub async fn list_by_user(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<UploadedDocument>, AppError> {
    sqlx::query_as::<_, UploadedDocument>(&format!(
        "SELECT {COLUMNS} FROM documents WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Where one of the user's documents is stored, with the name and type
/// to serve it under.
#[derive(Debug, sqlx::FromRow)]
pub struct StoredDocument {
    pub file_name: String,
    pub content_type: String,
    pub storage_key: String,
}

/// Look up the user's document for download. Documents of other users are
/// reported as missing.
pub async fn find_stored(pool: &Pool<Postgres>, user_id: i64, id: Uuid) -> Result<StoredDocument, AppError> {
    sqlx::query_as::<_, StoredDocument>(
        "SELECT file_name, content_type, storage_key FROM documents WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Document not found"))
}

/// Delete the user's document row and return its storage key. Documents
/// of other users are reported as missing.
pub async fn delete(pool: &Pool<Postgres>, user_id: i64, id: Uuid) -> Result<String, AppError> {
    sqlx::query_scalar::<_, String>(
        "DELETE FROM documents WHERE id = $1 AND user_id = $2 RETURNING storage_key",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Document not found"))
}
