//! Local filesystem attachment store.
//!
//! Files land under `{base_path}/{scope}/{uuid}-{name}` and are exposed at
//! `{public_base_url}/{scope}/{uuid}-{name}`; serving them is left to the
//! web server in front of the API.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::messaging::{AttachmentRef, AttachmentUpload};
use crate::ports::AttachmentStorage;

#[derive(Debug, Clone)]
pub struct LocalAttachmentStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalAttachmentStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn storage_error(message: String) -> DomainError {
        DomainError::new(ErrorCode::StorageError, message)
    }
}

/// Reduces a client-supplied name to `[A-Za-z0-9._-]`, never starting with a dot.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.chars().take(120).collect()
    }
}

/// Writes `bytes` to `tmp`, syncs, then renames onto `path`. On any
/// failure `tmp` is removed before the error is returned.
async fn persist(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let result = write_and_rename(tmp, path, bytes).await;
    if result.is_err() {
        if let Err(cleanup) = fs::remove_file(tmp).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove partial upload");
            }
        }
    }
    result
}

async fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let mut file = fs::File::create(tmp).await.map_err(|e| {
        LocalAttachmentStorage::storage_error(format!("Failed to create {}: {}", tmp.display(), e))
    })?;
    file.write_all(bytes).await.map_err(|e| {
        LocalAttachmentStorage::storage_error(format!("Failed to write attachment: {}", e))
    })?;
    file.sync_all().await.map_err(|e| {
        LocalAttachmentStorage::storage_error(format!("Failed to sync attachment: {}", e))
    })?;
    drop(file);

    fs::rename(tmp, path).await.map_err(|e| {
        LocalAttachmentStorage::storage_error(format!("Failed to finalize attachment: {}", e))
    })
}

#[async_trait]
impl AttachmentStorage for LocalAttachmentStorage {
    async fn store(
        &self,
        scope: &str,
        upload: &AttachmentUpload,
    ) -> Result<AttachmentRef, DomainError> {
        let scope = sanitize(scope);
        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize(&upload.file_name));
        let dir = self.base_path.join(&scope);
        let path = dir.join(&file_name);
        let tmp = dir.join(format!("{}.tmp", file_name));

        fs::create_dir_all(&dir).await.map_err(|e| {
            Self::storage_error(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        persist(&tmp, &path, &upload.bytes).await?;

        tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "Attachment stored");

        Ok(AttachmentRef {
            url: format!("{}/{}/{}", self.public_base_url, scope, file_name),
            name: upload.file_name.clone(),
        })
    }
}
