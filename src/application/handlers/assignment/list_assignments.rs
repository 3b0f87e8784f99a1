//! ListAssignmentsHandler - Every current assignment, for badges and "My Mentor".

use std::sync::Arc;

use crate::domain::assignment::{AssignmentError, AssignmentIndex, MentorAssignment};
use crate::ports::AssignmentRepository;

#[derive(Debug, Clone, Default)]
pub struct ListAssignmentsQuery;

#[derive(Debug, Clone)]
pub struct ListAssignmentsResult {
    /// Most recent first.
    pub assignments: Vec<MentorAssignment>,
}

impl ListAssignmentsResult {
    /// Entrepreneur-keyed lookup over the listed assignments.
    pub fn index(&self) -> AssignmentIndex {
        AssignmentIndex::from_assignments(self.assignments.iter().cloned())
    }
}

pub struct ListAssignmentsHandler {
    assignments: Arc<dyn AssignmentRepository>,
}

impl ListAssignmentsHandler {
    pub fn new(assignments: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignments }
    }

    pub async fn handle(
        &self,
        _query: ListAssignmentsQuery,
    ) -> Result<ListAssignmentsResult, AssignmentError> {
        let mut assignments = self.assignments.list_all().await?;
        assignments.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        Ok(ListAssignmentsResult { assignments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::assignment::AssignmentBadge;
    use crate::domain::foundation::ApplicantId;

    #[tokio::test]
    async fn index_renders_badges() {
        let e1 = entrepreneur("e1@example.com", "Erin");
        let m1 = approved_mentor("m1@example.com", "Mia");
        let repo = Arc::new(MockAssignmentRepository::with(vec![assignment(&e1, &m1, 4)]));
        let handler = ListAssignmentsHandler::new(repo);

        let result = handler.handle(ListAssignmentsQuery).await.unwrap();
        let index = result.index();

        assert_eq!(result.assignments.len(), 1);
        assert_eq!(index.badge_for(&e1.id).to_string(), "Mentor Mia - Portfolio 4");
        assert_eq!(index.badge_for(&ApplicantId::new()), AssignmentBadge::Unassigned);
    }
}
