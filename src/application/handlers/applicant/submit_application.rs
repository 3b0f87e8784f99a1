//! SubmitApplicationHandler - Command handler for new applications.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError, ApplicantPayload, ApplicantSubmitted};
use crate::domain::foundation::{EmailAddress, EventId, SerializableDomainEvent};
use crate::ports::{ApplicantRepository, EventPublisher};

/// Command to submit an application.
#[derive(Debug, Clone)]
pub struct SubmitApplicationCommand {
    pub email: EmailAddress,
    pub name: String,
    /// Role-tagged payload; its tag decides the applicant's role.
    pub payload: ApplicantPayload,
}

#[derive(Debug, Clone)]
pub struct SubmitApplicationResult {
    pub applicant: Applicant,
}

/// Handler for submitting applications.
///
/// One application per (role, email). The payload is validated before any
/// repository call.
pub struct SubmitApplicationHandler {
    repository: Arc<dyn ApplicantRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitApplicationHandler {
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
        cmd: SubmitApplicationCommand,
    ) -> Result<SubmitApplicationResult, ApplicantError> {
        // 1. Build and validate locally
        let applicant = Applicant::submit(cmd.email, cmd.name, cmd.payload)?;

        // 2. Reject duplicates for the same role
        if self
            .repository
            .find_by_email(applicant.role, &applicant.email)
            .await?
            .is_some()
        {
            return Err(ApplicantError::validation(
                "email",
                format!("a {} application already exists for this email", applicant.role),
            ));
        }

        // 3. Persist; the stored record is authoritative
        let applicant = self.repository.save(&applicant).await?;

        tracing::info!(
            applicant_id = %applicant.id,
            role = %applicant.role,
            "Application submitted"
        );

        // 4. Audit event (never fatal)
        let event = ApplicantSubmitted {
            event_id: EventId::new(),
            applicant_id: applicant.id,
            role: applicant.role,
            email: applicant.email.clone(),
            submitted_at: applicant.submitted_at,
        };
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(applicant_id = %applicant.id, error = %e, "Failed to publish submission event");
        }

        Ok(SubmitApplicationResult { applicant })
    }
}
