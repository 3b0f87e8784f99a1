//! Attachment references and upload validation.

use serde::{Deserialize, Serialize};

use super::MessagingError;

/// Largest accepted attachment, in bytes.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for attachments: PDF, Word, Excel, CSV, plain text
/// and common images.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/csv",
    "text/plain",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
];

/// Stored attachment, referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub url: String,
    pub name: String,
}

/// An attachment on its way to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), MessagingError> {
        if self.file_name.trim().is_empty() {
            return Err(MessagingError::invalid_attachment("file name is empty"));
        }
        validate_attachment(&self.mime_type, self.size())
    }
}

/// Checks an attachment's declared MIME type and size.
///
/// MIME parameters (`; charset=...`) are ignored and matching is
/// case-insensitive.
pub fn validate_attachment(mime_type: &str, size_bytes: u64) -> Result<(), MessagingError> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ALLOWED_MIME_TYPES.contains(&essence.as_str()) {
        return Err(MessagingError::invalid_attachment(format!(
            "file type '{}' is not allowed",
            mime_type
        )));
    }
    if size_bytes > MAX_ATTACHMENT_BYTES {
        return Err(MessagingError::invalid_attachment(format!(
            "file is {} bytes, limit is {} bytes",
            size_bytes, MAX_ATTACHMENT_BYTES
        )));
    }
    Ok(())
}
