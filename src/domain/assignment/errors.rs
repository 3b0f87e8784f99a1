//! Assignment-specific error types.
//!
//! An assignment is either fully recorded or not at all; every variant here
//! is raised before anything is persisted.

use crate::domain::foundation::{
    ApplicantId, AssignmentId, DomainError, ErrorCategory, ErrorCode, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// Mentor exists but is not approved.
    MentorNotApproved(ApplicantId),

    /// Portfolio number outside 1..=10.
    InvalidPortfolioNumber(i64),

    MentorNotFound(ApplicantId),

    /// The referenced applicant is not a mentor.
    NotAMentor(ApplicantId),

    EntrepreneurNotFound(ApplicantId),

    /// The referenced applicant is not an entrepreneur.
    NotAnEntrepreneur(ApplicantId),

    AssignmentNotFound(AssignmentId),

    Infrastructure(String),
}

impl AssignmentError {
    pub fn mentor_not_approved(id: ApplicantId) -> Self {
        AssignmentError::MentorNotApproved(id)
    }

    pub fn invalid_portfolio_number(value: i64) -> Self {
        AssignmentError::InvalidPortfolioNumber(value)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AssignmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssignmentError::MentorNotApproved(_) => ErrorCode::MentorNotApproved,
            AssignmentError::InvalidPortfolioNumber(_) => ErrorCode::InvalidPortfolioNumber,
            AssignmentError::MentorNotFound(_) => ErrorCode::MentorNotFound,
            AssignmentError::NotAMentor(_) | AssignmentError::NotAnEntrepreneur(_) => {
                ErrorCode::PayloadRoleMismatch
            }
            AssignmentError::EntrepreneurNotFound(_) => ErrorCode::ApplicantNotFound,
            AssignmentError::AssignmentNotFound(_) => ErrorCode::AssignmentNotFound,
            AssignmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    pub fn message(&self) -> String {
        match self {
            AssignmentError::MentorNotApproved(id) => {
                format!("Mentor {} is not approved", id)
            }
            AssignmentError::InvalidPortfolioNumber(n) => {
                format!("Portfolio number must be between 1 and 10, got {}", n)
            }
            AssignmentError::MentorNotFound(id) => format!("Mentor not found: {}", id),
            AssignmentError::NotAMentor(id) => format!("Applicant {} is not a mentor", id),
            AssignmentError::EntrepreneurNotFound(id) => {
                format!("Entrepreneur not found: {}", id)
            }
            AssignmentError::NotAnEntrepreneur(id) => {
                format!("Applicant {} is not an entrepreneur", id)
            }
            AssignmentError::AssignmentNotFound(id) => format!("Assignment not found: {}", id),
            AssignmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AssignmentError::Infrastructure(_))
    }
}

impl std::fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssignmentError {}

impl From<ValidationError> for AssignmentError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::OutOfRange { actual, .. } => {
                AssignmentError::InvalidPortfolioNumber(actual)
            }
            other => AssignmentError::Infrastructure(other.to_string()),
        }
    }
}

impl From<DomainError> for AssignmentError {
    fn from(err: DomainError) -> Self {
        AssignmentError::Infrastructure(err.to_string())
    }
}

impl From<AssignmentError> for DomainError {
    fn from(err: AssignmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_validation_becomes_invalid_portfolio_number() {
        let err: AssignmentError =
            ValidationError::out_of_range("portfolio_number", 1, 10, 42).into();
        assert_eq!(err, AssignmentError::InvalidPortfolioNumber(42));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn mentor_not_approved_is_invalid_state() {
        let err = AssignmentError::mentor_not_approved(ApplicantId::new());
        assert_eq!(err.code(), ErrorCode::MentorNotApproved);
        assert_eq!(err.category(), ErrorCategory::InvalidState);
        assert!(!err.is_retryable());
    }

    #[test]
    fn infrastructure_is_retryable_persistence() {
        let err = AssignmentError::infrastructure("connection reset");
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Persistence);
    }
}
