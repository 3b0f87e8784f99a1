//! GetAdminDashboardHandler - Query handler for the admin overview.
//!
//! Every request re-fetches applicants, assignments and the admin's unread
//! inputs concurrently and recomputes the projection from that snapshot.

use std::sync::Arc;

use crate::domain::assignment::AssignmentIndex;
use crate::domain::dashboard::{AdminDashboard, AdminFilter};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::messaging::{count_unread, ViewerKey};
use crate::ports::{
    ApplicantRepository, AssignmentRepository, MessageRepository, ReadStateStore,
    ThreadRepository,
};

/// Query for the admin dashboard.
#[derive(Debug, Clone)]
pub struct GetAdminDashboardQuery {
    pub viewer: AuthenticatedUser,
    pub filter: AdminFilter,
}

pub struct GetAdminDashboardHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    messages: Arc<dyn MessageRepository>,
    threads: Arc<dyn ThreadRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl GetAdminDashboardHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        messages: Arc<dyn MessageRepository>,
        threads: Arc<dyn ThreadRepository>,
        read_state: Arc<dyn ReadStateStore>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            messages,
            threads,
            read_state,
        }
    }

    pub async fn handle(&self, query: GetAdminDashboardQuery) -> Result<AdminDashboard, DomainError> {
        if !query.viewer.is_admin() {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Admin dashboard requires the admin role",
            ));
        }
        let viewer = ViewerKey::from(&query.viewer);

        let (applicants, assignments, messages, threads, state) = futures::try_join!(
            self.applicants.list_by_role(None),
            self.assignments.list_all(),
            self.messages.list_for(&viewer.email),
            self.threads.list_for(&viewer.email),
            async { self.read_state.load(&viewer).await.map_err(DomainError::from) },
        )?;

        let index = AssignmentIndex::from_assignments(assignments);
        let unread = count_unread(&messages, &threads, &viewer, &state);
        Ok(AdminDashboard::project(&applicants, &index, unread, query.filter))
    }
}
