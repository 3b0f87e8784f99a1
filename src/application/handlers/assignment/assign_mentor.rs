//! AssignMentorHandler - Create or replace an entrepreneur's mentor/portfolio pair.

use std::sync::Arc;

use crate::domain::assignment::{
    AssignmentError, AssignmentRecorded, MentorAssignment, PortfolioNumber,
};
use crate::domain::foundation::{ApplicantId, SerializableDomainEvent};
use crate::ports::{ApplicantRepository, AssignmentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct AssignMentorCommand {
    pub entrepreneur_id: ApplicantId,
    pub mentor_id: ApplicantId,
    /// Raw input; must be within 1..=10.
    pub portfolio_number: i64,
}

#[derive(Debug, Clone)]
pub struct AssignMentorResult {
    /// The record as persisted.
    pub assignment: MentorAssignment,
    /// The pair this assignment replaced, if any.
    pub previous: Option<MentorAssignment>,
}

/// Upserts the assignment keyed by entrepreneur.
///
/// All preconditions are checked before the single upsert, so a failed
/// assignment leaves the previous pair in place. Concurrent assigns are
/// last-write-wins in the repository.
pub struct AssignMentorHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AssignMentorHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AssignMentorCommand,
    ) -> Result<AssignMentorResult, AssignmentError> {
        // 1. Local validation precedes any I/O
        PortfolioNumber::new(cmd.portfolio_number)?;

        // 2. Load both parties
        let entrepreneur = self
            .applicants
            .find_by_id(&cmd.entrepreneur_id)
            .await?
            .ok_or(AssignmentError::EntrepreneurNotFound(cmd.entrepreneur_id))?;
        let mentor = self
            .applicants
            .find_by_id(&cmd.mentor_id)
            .await?
            .ok_or(AssignmentError::MentorNotFound(cmd.mentor_id))?;

        // 3. Build the replacement record
        let previous = self
            .assignments
            .find_by_entrepreneur(&cmd.entrepreneur_id)
            .await?;
        let intended = MentorAssignment::record(
            previous.as_ref(),
            &entrepreneur,
            &mentor,
            cmd.portfolio_number,
        )?;

        // 4. Persist; the stored record is authoritative
        let assignment = self.assignments.upsert(&intended).await.map_err(|e| {
            tracing::error!(entrepreneur_id = %cmd.entrepreneur_id, error = %e, "Failed to persist assignment");
            AssignmentError::from(e)
        })?;

        tracing::info!(
            entrepreneur_id = %assignment.entrepreneur_id,
            mentor_id = %assignment.mentor_id,
            portfolio = %assignment.portfolio_number,
            reassigned = previous.is_some(),
            "Mentor assigned"
        );

        // 5. Audit trail carries the replaced pair
        let event = AssignmentRecorded::new(&assignment, previous.as_ref());
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(assignment_id = %assignment.id, error = %e, "Failed to publish assignment event");
        }

        Ok(AssignMentorResult {
            assignment,
            previous,
        })
    }
}
