//! Applicant-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NotFoundByEmail | 404 |
//! | InvalidTransition | 409 |
//! | NotAnEntrepreneur | 400 |
//! | ValidationFailed | 400 |
//! | Forbidden | 403 |
//! | PaymentFailed | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    ApplicantId, DomainError, ErrorCategory, ErrorCode, ValidationError,
};

/// Applicant lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicantError {
    /// No applicant with this id.
    NotFound(ApplicantId),

    /// No applicant registered under this email.
    NotFoundByEmail(String),

    /// The status graph forbids this action from the current status.
    InvalidTransition { current: String, attempted: String },

    /// Operation only applies to entrepreneurs.
    NotAnEntrepreneur(ApplicantId),

    /// Actor may not perform this operation.
    Forbidden(String),

    /// Payment provider failed.
    PaymentFailed { reason: String },

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl ApplicantError {
    pub fn not_found(id: ApplicantId) -> Self {
        ApplicantError::NotFound(id)
    }

    pub fn not_found_by_email(email: impl Into<String>) -> Self {
        ApplicantError::NotFoundByEmail(email.into())
    }

    pub fn invalid_transition(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        ApplicantError::InvalidTransition {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn not_an_entrepreneur(id: ApplicantId) -> Self {
        ApplicantError::NotAnEntrepreneur(id)
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        ApplicantError::Forbidden(reason.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        ApplicantError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApplicantError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ApplicantError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApplicantError::NotFound(_) | ApplicantError::NotFoundByEmail(_) => {
                ErrorCode::ApplicantNotFound
            }
            ApplicantError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            ApplicantError::NotAnEntrepreneur(_) => ErrorCode::PayloadRoleMismatch,
            ApplicantError::Forbidden(_) => ErrorCode::Forbidden,
            ApplicantError::PaymentFailed { .. } => ErrorCode::PaymentFailed,
            ApplicantError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ApplicantError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    pub fn message(&self) -> String {
        match self {
            ApplicantError::NotFound(id) => format!("Applicant not found: {}", id),
            ApplicantError::NotFoundByEmail(email) => {
                format!("No applicant registered for {}", email)
            }
            ApplicantError::InvalidTransition { current, attempted } => {
                format!("Cannot {} an application that is {}", attempted, current)
            }
            ApplicantError::NotAnEntrepreneur(id) => {
                format!("Applicant {} is not an entrepreneur", id)
            }
            ApplicantError::Forbidden(reason) => format!("Forbidden: {}", reason),
            ApplicantError::PaymentFailed { reason } => format!("Payment failed: {}", reason),
            ApplicantError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ApplicantError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicantError::Infrastructure(_) | ApplicantError::PaymentFailed { .. }
        )
    }
}

impl std::fmt::Display for ApplicantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApplicantError {}

impl From<ValidationError> for ApplicantError {
    fn from(err: ValidationError) -> Self {
        ApplicantError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for ApplicantError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ApplicantError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::PaymentFailed => ApplicantError::PaymentFailed {
                reason: err.message,
            },
            ErrorCode::Forbidden | ErrorCode::Unauthorized => ApplicantError::Forbidden(err.message),
            _ => ApplicantError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ApplicantError> for DomainError {
    fn from(err: ApplicantError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
