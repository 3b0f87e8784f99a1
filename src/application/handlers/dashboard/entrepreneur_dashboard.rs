//! GetEntrepreneurDashboardHandler - Query handler for an entrepreneur's home view.

use std::sync::Arc;

use crate::domain::dashboard::{EntrepreneurDashboard, EntrepreneurSnapshot};
use crate::domain::foundation::{
    ActorRole, AuthenticatedUser, DomainError, ErrorCode, Role,
};
use crate::domain::messaging::{count_unread, ViewerKey};
use crate::ports::{
    ApplicantRepository, AssignmentRepository, MessageRepository, NoteRepository,
    ReadStateStore, ThreadRepository,
};

#[derive(Debug, Clone)]
pub struct GetEntrepreneurDashboardQuery {
    pub viewer: AuthenticatedUser,
}

/// Builds the dashboard in two rounds: the applicant record first, then
/// everything keyed on it concurrently. Mentor and notes are only fetched
/// when an assignment exists.
pub struct GetEntrepreneurDashboardHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    notes: Arc<dyn NoteRepository>,
    messages: Arc<dyn MessageRepository>,
    threads: Arc<dyn ThreadRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl GetEntrepreneurDashboardHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        notes: Arc<dyn NoteRepository>,
        messages: Arc<dyn MessageRepository>,
        threads: Arc<dyn ThreadRepository>,
        read_state: Arc<dyn ReadStateStore>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            notes,
            messages,
            threads,
            read_state,
        }
    }

    pub async fn handle(
        &self,
        query: GetEntrepreneurDashboardQuery,
    ) -> Result<EntrepreneurDashboard, DomainError> {
        if query.viewer.role != ActorRole::Entrepreneur {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Entrepreneur dashboard requires the entrepreneur role",
            ));
        }
        let viewer = ViewerKey::from(&query.viewer);

        let applicant = self
            .applicants
            .find_by_email(Role::Entrepreneur, &viewer.email)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ApplicantNotFound, "No application for this account")
                    .with_detail("email", viewer.email.as_str())
            })?;

        let (assignment, coaches, messages, threads, state) = futures::try_join!(
            self.assignments.find_by_entrepreneur(&applicant.id),
            self.applicants.list_by_role(Some(Role::Coach)),
            self.messages.list_for(&viewer.email),
            self.threads.list_for(&viewer.email),
            async { self.read_state.load(&viewer).await.map_err(DomainError::from) },
        )?;

        let (mentor, notes) = match &assignment {
            Some(a) => futures::try_join!(
                self.applicants.find_by_id(&a.mentor_id),
                self.notes.list_for_assignment(&a.id),
            )?,
            None => (None, Vec::new()),
        };

        let unread = count_unread(&messages, &threads, &viewer, &state);
        Ok(EntrepreneurDashboard::project(
            &applicant,
            EntrepreneurSnapshot {
                assignment: assignment.as_ref(),
                mentor: mentor.as_ref(),
                notes: &notes,
                coaches: &coaches,
                unread,
            },
        ))
    }
}
