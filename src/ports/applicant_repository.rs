//! Applicant repository port.
//!
//! Writes return the stored record. Callers adopt that response as the
//! authoritative state rather than the value they sent.

use crate::domain::applicant::Applicant;
use crate::domain::foundation::{ApplicantId, DomainError, EmailAddress, Role};
use async_trait::async_trait;

#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Insert a new applicant.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if (role, email) is already registered
    /// - `DatabaseError` on persistence failure
    async fn save(&self, applicant: &Applicant) -> Result<Applicant, DomainError>;

    /// Replace an existing applicant record.
    ///
    /// # Errors
    ///
    /// - `ApplicantNotFound` if the id is unknown
    /// - `DatabaseError` on persistence failure
    async fn update(&self, applicant: &Applicant) -> Result<Applicant, DomainError>;

    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError>;

    /// An email may hold one application per role.
    async fn find_by_email(
        &self,
        role: Role,
        email: &EmailAddress,
    ) -> Result<Option<Applicant>, DomainError>;

    /// All applicants, optionally of one role, ordered by submission time.
    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Applicant>, DomainError>;
}
