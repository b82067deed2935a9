use dioxus::prelude::*;
use shared_types::UploadedDocument;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// Store an uploaded file. `data_base64` is the file's bytes in standard
/// base64.
#[cfg_attr(feature = "server", tracing::instrument(skip(data_base64)))]
#[server]
pub async fn upload_document(
    file_name: String,
    content_type: String,
    data_base64: String,
) -> Result<UploadedDocument, ServerFnError> {
    use base64::Engine;
    use sha2::{Digest, Sha256};
    use shared_types::AppError;
    use uuid::Uuid;

    use crate::repo::document::{self, NewDocument};
    use crate::storage::{document_store, storage_key, ObjectStore};

    let claims = require_auth()?;
    let max_bytes = crate::config::max_upload_bytes();

    // Reject oversized payloads before decoding them.
    let estimated = (data_base64.len() as u64 / 4) * 3;
    if estimated > max_bytes + 3 {
        return Err(AppError::field(
            "file",
            format!(
                "File exceeds the {} upload limit",
                shared_types::format_file_size(max_bytes)
            ),
        )
        .into_server_fn_error());
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data_base64.trim())
        .map_err(|_| AppError::bad_request("File data is not valid base64").into_server_fn_error())?;

    let reported = Some(content_type.as_str()).filter(|t| !t.trim().is_empty());
    let content_type = shared_types::validate_upload(&file_name, reported, bytes.len() as u64, max_bytes)
        .map_err(|e| e.into_server_fn_error())?;

    let checksum = format!("{:x}", Sha256::digest(&bytes));
    let id = Uuid::new_v4();
    let key = storage_key(claims.sub, id, &file_name);
    let size_bytes = bytes.len() as i64;

    let store = document_store().await.map_err(|e| e.into_server_fn_error())?;
    store
        .put(&key, content_type, bytes)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let pool = db().await?;
    let display_name = file_name.rsplit(['/', '\\']).next().unwrap_or(&file_name).trim();
    let inserted = document::insert(
        pool,
        &NewDocument {
            id,
            user_id: claims.sub,
            file_name: display_name,
            content_type,
            size_bytes,
            checksum: &checksum,
            storage_key: &key,
        },
    )
    .await;

    match inserted {
        Ok(doc) => {
            tracing::info!(user_id = claims.sub, document_id = %doc.id, size_bytes, "document uploaded");
            Ok(doc)
        }
        Err(e) => {
            if let Err(cleanup) = store.delete(&key).await {
                tracing::warn!(key, error = %cleanup, "orphaned upload could not be removed");
            }
            Err(e.into_server_fn_error())
        }
    }
}

/// The caller's documents, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_documents() -> Result<Vec<UploadedDocument>, ServerFnError> {
    let claims = require_auth()?;
    let pool = db().await?;
    crate::repo::document::list_by_user(pool, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Delete one of the caller's documents. Other users' ids are reported as
/// not found.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_document(id: String) -> Result<(), ServerFnError> {
    use crate::storage::{document_store, ObjectStore};

    let claims = require_auth()?;
    let id = parse_id(&id, "document")?;
    let pool = db().await?;

    let key = crate::repo::document::delete(pool, claims.sub, id)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let store = document_store().await.map_err(|e| e.into_server_fn_error())?;
    if let Err(e) = store.delete(&key).await {
        tracing::warn!(key, error = %e, "document row removed but object delete failed");
    }
    Ok(())
}
