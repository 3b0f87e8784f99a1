//! SetApplicantAccessHandler - Admin disable/enable.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantAccessChanged, ApplicantError, Change};
use crate::domain::foundation::{ApplicantId, EventId, SerializableDomainEvent, Timestamp};
use crate::ports::{ApplicantRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct SetApplicantAccessCommand {
    pub applicant_id: ApplicantId,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct SetApplicantAccessResult {
    pub applicant: Applicant,
    pub change: Change,
}

/// Toggles the disabled flag. Status is untouched.
pub struct SetApplicantAccessHandler {
    repository: Arc<dyn ApplicantRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SetApplicantAccessHandler {
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
        cmd: SetApplicantAccessCommand,
    ) -> Result<SetApplicantAccessResult, ApplicantError> {
        let current = self
            .repository
            .find_by_id(&cmd.applicant_id)
            .await?
            .ok_or_else(|| ApplicantError::not_found(cmd.applicant_id))?;

        let mut intended = current.clone();
        let change = intended.set_disabled(cmd.disabled);
        if change == Change::Unchanged {
            return Ok(SetApplicantAccessResult {
                applicant: current,
                change,
            });
        }

        let applicant = self.repository.update(&intended).await?;
        tracing::info!(applicant_id = %applicant.id, disabled = cmd.disabled, "Applicant access changed");

        let event = ApplicantAccessChanged {
            event_id: EventId::new(),
            applicant_id: applicant.id,
            disabled: applicant.is_disabled,
            changed_at: Timestamp::now(),
        };
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(applicant_id = %applicant.id, error = %e, "Failed to publish access event");
        }

        Ok(SetApplicantAccessResult { applicant, change })
    }
}
