//! Messaging-specific error types.

use crate::domain::foundation::{
    AssignmentId, DomainError, ErrorCategory, ErrorCode, NoteId, ThreadId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagingError {
    ThreadNotFound(ThreadId),

    NoteNotFound(NoteId),

    AssignmentNotFound(AssignmentId),

    /// Actor is not allowed to do this. Raised before any I/O.
    Permission(String),

    /// Thread is closed; no further entries.
    ThreadClosed(ThreadId),

    /// Note response carried neither text nor attachment.
    EmptyResponse,

    /// Attachment failed the MIME allow-list or size limit.
    InvalidAttachment { reason: String },

    ValidationFailed { field: String, message: String },

    /// Attachment upload failed.
    Storage(String),

    Infrastructure(String),
}

impl MessagingError {
    pub fn permission(reason: impl Into<String>) -> Self {
        MessagingError::Permission(reason.into())
    }

    pub fn invalid_attachment(reason: impl Into<String>) -> Self {
        MessagingError::InvalidAttachment {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MessagingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        MessagingError::Storage(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MessagingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MessagingError::ThreadNotFound(_) => ErrorCode::ThreadNotFound,
            MessagingError::NoteNotFound(_) => ErrorCode::NoteNotFound,
            MessagingError::AssignmentNotFound(_) => ErrorCode::AssignmentNotFound,
            MessagingError::Permission(_) => ErrorCode::Forbidden,
            MessagingError::ThreadClosed(_) => ErrorCode::ThreadClosed,
            MessagingError::EmptyResponse => ErrorCode::EmptyResponse,
            MessagingError::InvalidAttachment { .. } => ErrorCode::InvalidAttachment,
            MessagingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MessagingError::Storage(_) => ErrorCode::StorageError,
            MessagingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    pub fn message(&self) -> String {
        match self {
            MessagingError::ThreadNotFound(id) => format!("Thread not found: {}", id),
            MessagingError::NoteNotFound(id) => format!("Note not found: {}", id),
            MessagingError::AssignmentNotFound(id) => format!("Assignment not found: {}", id),
            MessagingError::Permission(reason) => format!("Not permitted: {}", reason),
            MessagingError::ThreadClosed(id) => format!("Thread {} is closed", id),
            MessagingError::EmptyResponse => {
                "A response needs text or an attachment".to_string()
            }
            MessagingError::InvalidAttachment { reason } => {
                format!("Invalid attachment: {}", reason)
            }
            MessagingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MessagingError::Storage(msg) => format!("Attachment storage failed: {}", msg),
            MessagingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MessagingError::Infrastructure(_) | MessagingError::Storage(_)
        )
    }
}

impl std::fmt::Display for MessagingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MessagingError {}

impl From<ValidationError> for MessagingError {
    fn from(err: ValidationError) -> Self {
        MessagingError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for MessagingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StorageError => MessagingError::Storage(err.message),
            ErrorCode::Forbidden => MessagingError::Permission(err.message),
            _ => MessagingError::Infrastructure(err.to_string()),
        }
    }
}

impl MessagingError {
    /// Maps a repository error raised while writing thread `id`.
    pub fn for_thread(id: ThreadId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::ThreadNotFound => MessagingError::ThreadNotFound(id),
            ErrorCode::ThreadClosed => MessagingError::ThreadClosed(id),
            _ => err.into(),
        }
    }

    /// Maps a repository error raised while writing note `id`.
    pub fn for_note(id: NoteId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::NoteNotFound => MessagingError::NoteNotFound(id),
            _ => err.into(),
        }
    }
}

impl From<MessagingError> for DomainError {
    fn from(err: MessagingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
