//! In-memory assignment repository keyed by entrepreneur.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::assignment::MentorAssignment;
use crate::domain::foundation::{ApplicantId, AssignmentId, DomainError};
use crate::ports::AssignmentRepository;

#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepository {
    by_entrepreneur: RwLock<HashMap<ApplicantId, MentorAssignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn upsert(&self, assignment: &MentorAssignment) -> Result<MentorAssignment, DomainError> {
        self.by_entrepreneur
            .write()
            .await
            .insert(assignment.entrepreneur_id, assignment.clone());
        Ok(assignment.clone())
    }

    async fn find_by_entrepreneur(
        &self,
        entrepreneur_id: &ApplicantId,
    ) -> Result<Option<MentorAssignment>, DomainError> {
        Ok(self.by_entrepreneur.read().await.get(entrepreneur_id).cloned())
    }

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<MentorAssignment>, DomainError> {
        Ok(self
            .by_entrepreneur
            .read()
            .await
            .values()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<MentorAssignment>, DomainError> {
        let mut list: Vec<_> = self.by_entrepreneur.read().await.values().cloned().collect();
        list.sort_by_key(|a| a.assigned_at);
        Ok(list)
    }
}
