//! Attachment storage port (object store for uploaded files).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::messaging::{AttachmentRef, AttachmentUpload};

/// Stores validated uploads and returns a URL reference.
///
/// Callers validate MIME type and size before calling `store`.
#[async_trait]
pub trait AttachmentStorage: Send + Sync {
    /// Store `upload` under `scope` (e.g. an assignment id).
    ///
    /// # Errors
    ///
    /// - `StorageError` when the write fails
    async fn store(&self, scope: &str, upload: &AttachmentUpload)
        -> Result<AttachmentRef, DomainError>;
}
