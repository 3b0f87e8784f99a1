//! Mentor assignment repository port.

use crate::domain::assignment::MentorAssignment;
use crate::domain::foundation::{ApplicantId, AssignmentId, DomainError};
use async_trait::async_trait;

/// Persistence for the entrepreneur-keyed assignment map.
///
/// Implementations must keep at most one row per entrepreneur. Concurrent
/// upserts resolve last-write-wins.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Create or replace the assignment for `assignment.entrepreneur_id`.
    ///
    /// Returns the stored record.
    async fn upsert(&self, assignment: &MentorAssignment) -> Result<MentorAssignment, DomainError>;

    async fn find_by_entrepreneur(
        &self,
        entrepreneur_id: &ApplicantId,
    ) -> Result<Option<MentorAssignment>, DomainError>;

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<MentorAssignment>, DomainError>;

    async fn list_all(&self) -> Result<Vec<MentorAssignment>, DomainError>;
}
