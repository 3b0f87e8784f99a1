//! Read state store port.
//!
//! Holds each viewer's read-id set and thread watermarks. Device-local
//! stores lose state on device change; the database cursor store does not.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::messaging::{MessagingError, ReadState, ViewerKey};

/// Errors that can occur while loading or saving read state.
#[derive(Debug, thiserror::Error)]
pub enum ReadStateError {
    #[error("Failed to serialize read state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize read state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ReadStateError> for MessagingError {
    fn from(err: ReadStateError) -> Self {
        MessagingError::infrastructure(err.to_string())
    }
}

impl From<ReadStateError> for DomainError {
    fn from(err: ReadStateError) -> Self {
        let code = match err {
            ReadStateError::IoError(_) => ErrorCode::StorageError,
            ReadStateError::DatabaseError(_) => ErrorCode::DatabaseError,
            _ => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[async_trait]
pub trait ReadStateStore: Send + Sync {
    /// Load a viewer's state. A viewer with no saved state gets the default.
    async fn load(&self, viewer: &ViewerKey) -> Result<ReadState, ReadStateError>;

    /// Persist a viewer's full state.
    async fn save(&self, viewer: &ViewerKey, state: &ReadState) -> Result<(), ReadStateError>;
}
