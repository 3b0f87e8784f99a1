//! ListApplicantsHandler - Query for admin applicant lists.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError};
use crate::domain::foundation::Role;
use crate::ports::ApplicantRepository;

#[derive(Debug, Clone, Default)]
pub struct ListApplicantsQuery {
    /// All roles when absent.
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct ListApplicantsResult {
    /// Newest submission first.
    pub applicants: Vec<Applicant>,
}

pub struct ListApplicantsHandler {
    repository: Arc<dyn ApplicantRepository>,
}

impl ListApplicantsHandler {
    pub fn new(repository: Arc<dyn ApplicantRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListApplicantsQuery,
    ) -> Result<ListApplicantsResult, ApplicantError> {
        let mut applicants = self.repository.list_by_role(query.role).await?;
        applicants.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(ListApplicantsResult { applicants })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    #[tokio::test]
    async fn filters_by_role() {
        let repo = Arc::new(MockApplicantRepository::with(vec![
            entrepreneur("erin@example.com", "Erin"),
            approved_mentor("mia@example.com", "Mia"),
        ]));
        let handler = ListApplicantsHandler::new(repo);

        let result = handler
            .handle(ListApplicantsQuery {
                role: Some(Role::Mentor),
            })
            .await
            .unwrap();

        assert_eq!(result.applicants.len(), 1);
        assert_eq!(result.applicants[0].role, Role::Mentor);
    }

    #[tokio::test]
    async fn lists_everyone_without_filter() {
        let repo = Arc::new(MockApplicantRepository::with(vec![
            entrepreneur("erin@example.com", "Erin"),
            approved_mentor("mia@example.com", "Mia"),
        ]));
        let handler = ListApplicantsHandler::new(repo);

        let result = handler.handle(ListApplicantsQuery::default()).await.unwrap();

        assert_eq!(result.applicants.len(), 2);
    }

    #[tokio::test]
    async fn read_failure_is_persistence_error() {
        let repo = Arc::new(MockApplicantRepository {
            fail_reads: true,
            ..MockApplicantRepository::default()
        });
        let handler = ListApplicantsHandler::new(repo);

        let err = handler.handle(ListApplicantsQuery::default()).await.unwrap_err();

        assert!(matches!(err, ApplicantError::Infrastructure(_)));
    }
}
