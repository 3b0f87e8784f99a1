//! ConfirmPaymentHandler - Settle a Founders Circle payment by email.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError, Change, PaymentConfirmed};
use crate::domain::foundation::{EmailAddress, EventId, Role, SerializableDomainEvent, Timestamp};
use crate::ports::{ApplicantRepository, EventPublisher, PaymentProvider};

#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub email: EmailAddress,
}

#[derive(Debug, Clone)]
pub struct ConfirmPaymentResult {
    pub success: bool,
    pub applicant: Applicant,
}

/// Asks the provider whether the entrepreneur has paid and records it.
///
/// Idempotent: an entrepreneur already marked paid succeeds without a
/// provider round trip.
pub struct ConfirmPaymentHandler {
    repository: Arc<dyn ApplicantRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        repository: Arc<dyn ApplicantRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, ApplicantError> {
        let applicant = self
            .repository
            .find_by_email(Role::Entrepreneur, &cmd.email)
            .await?
            .ok_or_else(|| ApplicantError::not_found_by_email(cmd.email.as_str()))?;

        if applicant.payment_status().is_paid() {
            return Ok(ConfirmPaymentResult {
                success: true,
                applicant,
            });
        }

        let confirmation = self
            .payment_provider
            .confirm_payment(&applicant.email)
            .await
            .map_err(|e| ApplicantError::payment_failed(e.message))?;

        if !confirmation.paid {
            return Ok(ConfirmPaymentResult {
                success: false,
                applicant,
            });
        }

        let (applicant, _) = record_payment(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            applicant,
            confirmation.session_id,
        )
        .await?;

        Ok(ConfirmPaymentResult {
            success: true,
            applicant,
        })
    }
}

/// Marks `applicant` paid, persists, and publishes `PaymentConfirmed`.
pub(super) async fn record_payment(
    repository: &dyn ApplicantRepository,
    event_publisher: &dyn EventPublisher,
    applicant: Applicant,
    session_id: Option<String>,
) -> Result<(Applicant, Change), ApplicantError> {
    let mut intended = applicant.clone();
    if intended.mark_paid()? == Change::Unchanged {
        return Ok((applicant, Change::Unchanged));
    }

    let applicant = repository.update(&intended).await?;
    tracing::info!(applicant_id = %applicant.id, "Payment recorded");

    let event = PaymentConfirmed {
        event_id: EventId::new(),
        applicant_id: applicant.id,
        email: applicant.email.clone(),
        checkout_session_id: session_id,
        confirmed_at: Timestamp::now(),
    };
    if let Err(e) = event_publisher.publish(event.to_envelope()).await {
        tracing::warn!(applicant_id = %applicant.id, error = %e, "Failed to publish payment event");
    }

    Ok((applicant, Change::Applied))
}
