//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse classification of every failure the core can report.
///
/// Drives user-facing behavior: validation failures are shown inline,
/// persistence failures as a generic retryable notice, not-found and
/// permission failures abort the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Persistence,
    NotFound,
    Permission,
    InvalidState,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidPortfolioNumber,
    InvalidAttachment,
    EmptyResponse,
    PayloadRoleMismatch,

    // Not found errors
    ApplicantNotFound,
    MentorNotFound,
    AssignmentNotFound,
    ThreadNotFound,
    NoteNotFound,

    // State errors
    InvalidStateTransition,
    MentorNotApproved,
    ThreadClosed,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // External collaborator errors
    PaymentFailed,
    RewriteFailed,
    NotificationFailed,

    // Infrastructure errors
    DatabaseError,
    StorageError,
    InternalError,
}

impl ErrorCode {
    /// Returns the category this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        use ErrorCode::*;
        match self {
            ValidationFailed | InvalidPortfolioNumber | InvalidAttachment | EmptyResponse
            | PayloadRoleMismatch => ErrorCategory::Validation,
            ApplicantNotFound | MentorNotFound | AssignmentNotFound | ThreadNotFound
            | NoteNotFound => ErrorCategory::NotFound,
            InvalidStateTransition | MentorNotApproved | ThreadClosed => {
                ErrorCategory::InvalidState
            }
            Unauthorized | Forbidden => ErrorCategory::Permission,
            PaymentFailed | RewriteFailed | NotificationFailed | DatabaseError | StorageError
            | InternalError => ErrorCategory::Persistence,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidPortfolioNumber => "INVALID_PORTFOLIO_NUMBER",
            ErrorCode::InvalidAttachment => "INVALID_ATTACHMENT",
            ErrorCode::EmptyResponse => "EMPTY_RESPONSE",
            ErrorCode::PayloadRoleMismatch => "PAYLOAD_ROLE_MISMATCH",
            ErrorCode::ApplicantNotFound => "APPLICANT_NOT_FOUND",
            ErrorCode::MentorNotFound => "MENTOR_NOT_FOUND",
            ErrorCode::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            ErrorCode::ThreadNotFound => "THREAD_NOT_FOUND",
            ErrorCode::NoteNotFound => "NOTE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::MentorNotApproved => "MENTOR_NOT_APPROVED",
            ErrorCode::ThreadClosed => "THREAD_CLOSED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::PaymentFailed => "PAYMENT_FAILED",
            ErrorCode::RewriteFailed => "REWRITE_FAILED",
            ErrorCode::NotificationFailed => "NOTIFICATION_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error type that crosses port boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("portfolio_number", 1, 10, 11);
        assert_eq!(
            format!("{}", err),
            "Field 'portfolio_number' must be between 1 and 10, got 11"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ThreadNotFound, "Thread not found");
        assert_eq!(format!("{}", err), "[THREAD_NOT_FOUND] Thread not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("email").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
    }

    #[test]
    fn error_codes_map_onto_categories() {
        assert_eq!(ErrorCode::InvalidAttachment.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::Persistence);
        assert_eq!(ErrorCode::MentorNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(ErrorCode::Forbidden.category(), ErrorCategory::Permission);
        assert_eq!(ErrorCode::ThreadClosed.category(), ErrorCategory::InvalidState);
    }
}
