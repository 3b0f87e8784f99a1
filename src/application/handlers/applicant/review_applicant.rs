//! ReviewApplicantHandler - Admin approve/reject decisions.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError, ApplicantReviewed, Change, ReviewAction};
use crate::domain::foundation::{ApplicantId, EventId, SerializableDomainEvent, Timestamp};
use crate::ports::{ApplicantRepository, EventPublisher, Notification, NotificationSender};

#[derive(Debug, Clone)]
pub struct ReviewApplicantCommand {
    pub applicant_id: ApplicantId,
    pub action: ReviewAction,
}

#[derive(Debug, Clone)]
pub struct ReviewApplicantResult {
    /// The record as persisted.
    pub applicant: Applicant,
    /// `Unchanged` when the decision repeated the current status.
    pub change: Change,
}

/// Handler for admin review decisions.
///
/// The new status is computed on a copy, persisted, and only the
/// repository's response is returned. Approval e-mails are fire-and-forget.
pub struct ReviewApplicantHandler {
    repository: Arc<dyn ApplicantRepository>,
    notifier: Arc<dyn NotificationSender>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ReviewApplicantHandler {
    pub fn new(
        repository: Arc<dyn ApplicantRepository>,
        notifier: Arc<dyn NotificationSender>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            notifier,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReviewApplicantCommand,
    ) -> Result<ReviewApplicantResult, ApplicantError> {
        let current = self
            .repository
            .find_by_id(&cmd.applicant_id)
            .await?
            .ok_or_else(|| ApplicantError::not_found(cmd.applicant_id))?;

        let mut intended = current.clone();
        let change = intended.review(cmd.action)?;
        if change == Change::Unchanged {
            return Ok(ReviewApplicantResult {
                applicant: current,
                change,
            });
        }

        let applicant = self.repository.update(&intended).await.map_err(|e| {
            tracing::error!(applicant_id = %cmd.applicant_id, error = %e, "Failed to persist review");
            ApplicantError::from(e)
        })?;

        tracing::info!(
            applicant_id = %applicant.id,
            from = %current.status,
            to = %applicant.status,
            "Application reviewed"
        );

        if cmd.action == ReviewAction::Approve {
            self.notify_approved(&applicant).await;
        }

        let event = ApplicantReviewed {
            event_id: EventId::new(),
            applicant_id: applicant.id,
            role: applicant.role,
            from: current.status,
            to: applicant.status,
            reviewed_at: Timestamp::now(),
        };
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(applicant_id = %applicant.id, error = %e, "Failed to publish review event");
        }

        Ok(ReviewApplicantResult { applicant, change })
    }

    async fn notify_approved(&self, applicant: &Applicant) {
        let notification = approval_notification(applicant);
        if let Err(e) = self.notifier.send(&notification).await {
            tracing::warn!(
                applicant_id = %applicant.id,
                error = %e,
                "Approval notification failed; approval stands"
            );
        }
    }
}

fn approval_notification(applicant: &Applicant) -> Notification {
    Notification {
        to: applicant.email.clone(),
        to_name: applicant.name.clone(),
        subject: format!("Your {} application has been approved", applicant.role),
        text_body: format!(
            "Hi {},\n\nGood news: your {} application has been approved. \
             Sign in to your dashboard to see what's next.\n",
            applicant.name, applicant.role
        ),
    }
}
