//! ResubmitApplicationHandler - A rejected applicant tries again.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError, ApplicantPayload, ApplicantResubmitted};
use crate::domain::foundation::{
    ApplicantId, AuthenticatedUser, EventId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{ApplicantRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct ResubmitApplicationCommand {
    pub applicant_id: ApplicantId,
    pub actor: AuthenticatedUser,
    /// Replacement payload; keeps the existing one when absent.
    pub payload: Option<ApplicantPayload>,
}

#[derive(Debug, Clone)]
pub struct ResubmitApplicationResult {
    pub applicant: Applicant,
}

/// Moves a rejected application back to `pending` with `is_resubmitted` set.
///
/// Only the applicant themself (matched by email) or an admin may resubmit.
pub struct ResubmitApplicationHandler {
    repository: Arc<dyn ApplicantRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ResubmitApplicationHandler {
    pub fn new(
        repository: Arc<dyn ApplicantRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResubmitApplicationCommand,
    ) -> Result<ResubmitApplicationResult, ApplicantError> {
        let current = self
            .repository
            .find_by_id(&cmd.applicant_id)
            .await?
            .ok_or_else(|| ApplicantError::not_found(cmd.applicant_id))?;

        if !cmd.actor.is_admin() && cmd.actor.email != current.email {
            return Err(ApplicantError::forbidden(
                "only the applicant may resubmit their application",
            ));
        }

        let mut intended = current;
        intended.resubmit(cmd.payload)?;
        let applicant = self.repository.update(&intended).await?;

        tracing::info!(applicant_id = %applicant.id, "Application resubmitted");

        let event = ApplicantResubmitted {
            event_id: EventId::new(),
            applicant_id: applicant.id,
            resubmitted_at: Timestamp::now(),
        };
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(applicant_id = %applicant.id, error = %e, "Failed to publish resubmission event");
        }

        Ok(ResubmitApplicationResult { applicant })
    }
}
