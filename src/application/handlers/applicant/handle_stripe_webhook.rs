//! HandlePaymentWebhookHandler - Processes payment provider webhooks.

use std::sync::Arc;

use crate::domain::applicant::{Applicant, ApplicantError, Change};
use crate::domain::foundation::{ApplicantId, EmailAddress, Role};
use crate::ports::{ApplicantRepository, EventPublisher, PaymentProvider, WebhookEventKind};

use super::confirm_payment::record_payment;

#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
    /// Signature header.
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Checkout completed and the entrepreneur is now paid.
    PaymentRecorded { applicant_id: ApplicantId },
    /// Checkout completed for someone already paid.
    AlreadyPaid { applicant_id: ApplicantId },
    /// Checkout completed but payment has not settled yet.
    Pending,
    /// Event type we do not act on.
    Ignored,
}

/// Handles `checkout.session.completed` with the same effect as
/// confirming payment by email.
pub struct HandlePaymentWebhookHandler {
    repository: Arc<dyn ApplicantRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl HandlePaymentWebhookHandler {
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
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, ApplicantError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected payment webhook");
                ApplicantError::forbidden("invalid webhook signature")
            })?;

        // 2. Only completed checkouts matter
        let (session_id, customer_email, client_reference_id, paid) = match event.kind {
            WebhookEventKind::CheckoutCompleted {
                session_id,
                customer_email,
                client_reference_id,
                paid,
            } => (session_id, customer_email, client_reference_id, paid),
            WebhookEventKind::Other { event_type } => {
                tracing::debug!(event_id = %event.id, %event_type, "Ignoring webhook event");
                return Ok(HandlePaymentWebhookResult::Ignored);
            }
        };
        if !paid {
            return Ok(HandlePaymentWebhookResult::Pending);
        }

        // 3. Locate the entrepreneur and record the payment
        let applicant = self
            .locate(client_reference_id.as_deref(), customer_email.as_deref())
            .await?;
        let (applicant, change) = record_payment(
            self.repository.as_ref(),
            self.event_publisher.as_ref(),
            applicant,
            Some(session_id),
        )
        .await?;

        Ok(match change {
            Change::Applied => HandlePaymentWebhookResult::PaymentRecorded {
                applicant_id: applicant.id,
            },
            Change::Unchanged => HandlePaymentWebhookResult::AlreadyPaid {
                applicant_id: applicant.id,
            },
        })
    }

    /// Prefers the client reference (our applicant id), falling back to email.
    async fn locate(
        &self,
        client_reference_id: Option<&str>,
        customer_email: Option<&str>,
    ) -> Result<Applicant, ApplicantError> {
        if let Some(id) = client_reference_id.and_then(|r| r.parse::<ApplicantId>().ok()) {
            if let Some(applicant) = self.repository.find_by_id(&id).await? {
                return Ok(applicant);
            }
        }

        let raw = customer_email
            .ok_or_else(|| ApplicantError::validation("customer_email", "webhook has no customer"))?;
        let email = EmailAddress::new(raw)?;
        self.repository
            .find_by_email(Role::Entrepreneur, &email)
            .await?
            .ok_or_else(|| ApplicantError::not_found_by_email(email.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::applicant::PaymentStatus;
    use crate::domain::foundation::ErrorCategory;
    use crate::ports::WebhookEvent;

    fn completed(reference: Option<String>, customer_email: Option<&str>) -> WebhookEvent {
        WebhookEvent {
            id: "evt_1".into(),
            kind: WebhookEventKind::CheckoutCompleted {
                session_id: "cs_1".into(),
                customer_email: customer_email.map(str::to_string),
                client_reference_id: reference,
                paid: true,
            },
            created_at: 1_700_000_000,
        }
    }

    fn command() -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            payload: b"{}".to_vec(),
            signature: "t=1,v1=abc".into(),
        }
    }

    #[tokio::test]
    async fn records_payment_by_client_reference() {
        let applicant = entrepreneur("erin@example.com", "Erin");
        let id = applicant.id;
        let repo = Arc::new(MockApplicantRepository::with(vec![applicant]));
        let handler = HandlePaymentWebhookHandler::new(
            repo.clone(),
            Arc::new(MockPaymentProvider::with_webhook(completed(Some(id.to_string()), None))),
            Arc::new(MockEventPublisher::new()),
        );

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result, HandlePaymentWebhookResult::PaymentRecorded { applicant_id: id });
        assert_eq!(repo.get(&id).unwrap().payment_status(), PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn falls_back_to_customer_email() {
        let applicant = entrepreneur("erin@example.com", "Erin");
        let id = applicant.id;
        let repo = Arc::new(MockApplicantRepository::with(vec![applicant]));
        let handler = HandlePaymentWebhookHandler::new(
            repo.clone(),
            Arc::new(MockPaymentProvider::with_webhook(completed(
                None,
                Some("Erin@Example.com"),
            ))),
            Arc::new(MockEventPublisher::new()),
        );

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result, HandlePaymentWebhookResult::PaymentRecorded { applicant_id: id });
    }

    #[tokio::test]
    async fn replayed_webhook_is_already_paid() {
        let applicant = paid_entrepreneur("erin@example.com", "Erin");
        let id = applicant.id;
        let publisher = Arc::new(MockEventPublisher::new());
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockApplicantRepository::with(vec![applicant])),
            Arc::new(MockPaymentProvider::with_webhook(completed(Some(id.to_string()), None))),
            publisher.clone(),
        );

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result, HandlePaymentWebhookResult::AlreadyPaid { applicant_id: id });
        assert!(publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn bad_signature_is_permission_error() {
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockApplicantRepository::default()),
            Arc::new(MockPaymentProvider::unpaid()),
            Arc::new(MockEventPublisher::new()),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Permission);
    }

    #[tokio::test]
    async fn other_events_are_ignored() {
        let handler = HandlePaymentWebhookHandler::new(
            Arc::new(MockApplicantRepository::default()),
            Arc::new(MockPaymentProvider::with_webhook(WebhookEvent {
                id: "evt_2".into(),
                kind: WebhookEventKind::Other {
                    event_type: "invoice.paid".into(),
                },
                created_at: 1_700_000_000,
            })),
            Arc::new(MockEventPublisher::new()),
        );

        assert_eq!(
            handler.handle(command()).await.unwrap(),
            HandlePaymentWebhookResult::Ignored
        );
    }
}
