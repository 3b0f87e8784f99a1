//! In-memory applicant repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::applicant::Applicant;
use crate::domain::foundation::{ApplicantId, DomainError, EmailAddress, ErrorCode, Role};
use crate::ports::ApplicantRepository;

#[derive(Debug, Default)]
pub struct InMemoryApplicantRepository {
    applicants: RwLock<HashMap<ApplicantId, Applicant>>,
}

impl InMemoryApplicantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicantRepository for InMemoryApplicantRepository {
    async fn save(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        let mut applicants = self.applicants.write().await;
        let duplicate = applicants
            .values()
            .any(|a| a.role == applicant.role && a.email == applicant.email);
        if duplicate || applicants.contains_key(&applicant.id) {
            return Err(DomainError::validation(
                "email",
                format!("{} already applied as {}", applicant.email, applicant.role),
            ));
        }
        applicants.insert(applicant.id, applicant.clone());
        Ok(applicant.clone())
    }

    async fn update(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        let mut applicants = self.applicants.write().await;
        match applicants.get_mut(&applicant.id) {
            Some(existing) => {
                *existing = applicant.clone();
                Ok(applicant.clone())
            }
            None => Err(DomainError::new(
                ErrorCode::ApplicantNotFound,
                format!("Applicant not found: {}", applicant.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError> {
        Ok(self.applicants.read().await.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &EmailAddress,
    ) -> Result<Option<Applicant>, DomainError> {
        Ok(self
            .applicants
            .read()
            .await
            .values()
            .find(|a| a.role == role && &a.email == email)
            .cloned())
    }

    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Applicant>, DomainError> {
        let mut list: Vec<Applicant> = self
            .applicants
            .read()
            .await
            .values()
            .filter(|a| role.map_or(true, |r| a.role == r))
            .cloned()
            .collect();
        list.sort_by_key(|a| a.submitted_at);
        Ok(list)
    }
}
