use std::path::{Component, Path, PathBuf};

use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    types::ServerSideEncryption,
    Client,
};
use shared_types::{sanitize_file_name, AppError};
use tokio::sync::OnceCell;
use uuid::Uuid;

static DOCUMENT_STORE: OnceCell<DocumentStore> = OnceCell::const_new();

/// Read an env var, falling back to a second name.
/// Fly/Tigris sets the `AWS_*` names, local MinIO uses `S3_*`.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
        .filter(|v| !v.trim().is_empty())
}

/// Object key for an uploaded document.
pub fn storage_key(user_id: i64, id: Uuid, file_name: &str) -> String {
    format!("documents/{user_id}/{id}-{}", sanitize_file_name(file_name))
}

/// Byte storage for uploaded documents.
#[allow(async_fn_in_trait)]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), AppError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError>;

    /// Remove an object. Missing objects are not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

// ── S3 ──────────────────────────────────────────────────────────────

/// S3-compatible store. Uploads use SSE-S3 (AES256).
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn from_env() -> Result<Self, AppError> {
        let missing = |name: &str| AppError::internal(format!("{name} must be set when the s3 feature is on"));
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT").ok_or_else(|| missing("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT"))?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY").ok_or_else(|| missing("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY"))?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY").ok_or_else(|| missing("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY"))?;
        let region = env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let bucket = std::env::var("DOCUMENTS_BUCKET").unwrap_or_else(|_| "documents".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");
        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket,
        })
    }

    /// Create the bucket when it does not exist yet.
    pub async fn ensure_bucket(&self) {
        let exists = self.client.head_bucket().bucket(&self.bucket).send().await.is_ok();
        if exists {
            return;
        }
        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => tracing::info!(bucket = %self.bucket, "documents bucket created"),
            Err(e) => tracing::warn!(bucket = %self.bucket, error = %e, "failed to create documents bucket"),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .server_side_encryption(ServerSideEncryption::Aes256)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!(key, error = ?svc, "S3 PutObject failed");
                AppError::internal("Document upload failed")
            })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                if svc.is_no_such_key() {
                    return AppError::not_found("Document not found");
                }
                tracing::error!(key, error = ?svc, "S3 GetObject failed");
                AppError::internal("Document download failed")
            })?;

        resp.body
            .collect()
            .await
            .map(|data| data.into_bytes().to_vec())
            .map_err(|e| AppError::internal(format!("Failed to read S3 response body: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key, error = %e, "S3 DeleteObject failed");
                AppError::internal("Document delete failed")
            })?;
        Ok(())
    }
}

// ── Local filesystem ────────────────────────────────────────────────

/// Stores objects as files under a root directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from `UPLOAD_DIR`, default `./uploads`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string()))
    }

    /// Resolve a key to a path inside the root. Keys with parent, root or
    /// prefix components are rejected.
    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::bad_request("Invalid storage key"));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(key: &str, err: std::io::Error) -> AppError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return AppError::not_found("Document not found");
    }
    tracing::error!(key, error = %err, "local object store error");
    AppError::internal("Document storage failed")
}

impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, _content_type: &str, body: Vec<u8>) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(key, e))?;
        }
        tokio::fs::write(&path, body).await.map_err(|e| io_error(key, e))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path).await.map_err(|e| io_error(key, e))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

// ── Selection ───────────────────────────────────────────────────────

/// The configured backend.
pub enum DocumentStore {
    S3(S3ObjectStore),
    Local(LocalObjectStore),
}

impl ObjectStore for DocumentStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<(), AppError> {
        match self {
            DocumentStore::S3(store) => store.put(key, content_type, body).await,
            DocumentStore::Local(store) => store.put(key, content_type, body).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        match self {
            DocumentStore::S3(store) => store.get(key).await,
            DocumentStore::Local(store) => store.get(key).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        match self {
            DocumentStore::S3(store) => store.delete(key).await,
            DocumentStore::Local(store) => store.delete(key).await,
        }
    }
}

/// The process-wide store: S3 when the `s3` flag is on, otherwise the
/// local upload directory.
pub async fn document_store() -> Result<&'static DocumentStore, AppError> {
    DOCUMENT_STORE
        .get_or_try_init(|| async {
            if crate::config::feature_flags().s3 {
                let store = S3ObjectStore::from_env()?;
                store.ensure_bucket().await;
                tracing::info!("documents stored in S3");
                Ok(DocumentStore::S3(store))
            } else {
                let store = LocalObjectStore::from_env();
                tracing::info!(root = %store.root.display(), "documents stored on local disk");
                Ok(DocumentStore::Local(store))
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::AppErrorKind;

    fn temp_store() -> LocalObjectStore {
        LocalObjectStore::new(std::env::temp_dir().join(format!("counselor-store-{}", Uuid::new_v4())))
    }

    #[test]
    fn storage_key_is_scoped_and_sanitized() {
        let id = Uuid::nil();
        assert_eq!(
            storage_key(42, id, "../Brief #1.pdf"),
            "documents/42/00000000-0000-0000-0000-000000000000-Brief__1.pdf"
        );
    }

    #[tokio::test]
    async fn local_store_round_trip_and_delete() {
        let store = temp_store();
        let key = storage_key(1, Uuid::new_v4(), "notes.txt");

        store.put(&key, "text/plain", b"holding".to_vec()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), b"holding".to_vec());

        store.delete(&key).await.unwrap();
        let err = store.get(&key).await.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);

        // Deleting twice is fine.
        store.delete(&key).await.unwrap();
        let _ = std::fs::remove_dir_all(&store.root);
    }

    #[tokio::test]
    async fn local_store_rejects_traversal() {
        let store = temp_store();
        for key in ["../escape.txt", "/etc/passwd", "documents/../../x", ""] {
            let err = store.put(key, "text/plain", vec![1]).await.unwrap_err();
            assert_eq!(err.kind, AppErrorKind::BadRequest, "key {key:?}");
        }
    }
}
