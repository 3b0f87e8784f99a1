//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresApplicantRepository` - Application records, payload as JSONB
//! - `PostgresAssignmentRepository` - Entrepreneur-keyed assignment upserts
//! - `PostgresMessageRepository`, `PostgresThreadRepository`,
//!   `PostgresNoteRepository` - Messaging
//! - `PostgresReadCursorStore` - Server-recorded read state per viewer
//!
//! Schema lives in `migrations/`.

mod applicant_repository;
mod assignment_repository;
mod messaging_repository;
mod read_cursor_store;

pub use applicant_repository::PostgresApplicantRepository;
pub use assignment_repository::PostgresAssignmentRepository;
pub use messaging_repository::{
    PostgresMessageRepository, PostgresNoteRepository, PostgresThreadRepository,
};
pub use read_cursor_store::PostgresReadCursorStore;

use crate::domain::foundation::{DomainError, ErrorCode};

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

fn corrupt(column: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, reason),
    )
}
