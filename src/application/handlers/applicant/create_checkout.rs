//! CreateCheckoutHandler - Start a Founders Circle checkout.

use std::sync::Arc;

use crate::domain::applicant::ApplicantError;
use crate::domain::foundation::{EmailAddress, Role};
use crate::ports::{ApplicantRepository, CheckoutSession, CreateCheckoutRequest, PaymentProvider};

#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub email: EmailAddress,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub session: CheckoutSession,
}

/// Creates a hosted checkout session for an entrepreneur.
pub struct CreateCheckoutHandler {
    repository: Arc<dyn ApplicantRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateCheckoutHandler {
    pub fn new(
        repository: Arc<dyn ApplicantRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, ApplicantError> {
        let applicant = self
            .repository
            .find_by_email(Role::Entrepreneur, &cmd.email)
            .await?
            .ok_or_else(|| ApplicantError::not_found_by_email(cmd.email.as_str()))?;

        if applicant.is_disabled {
            return Err(ApplicantError::forbidden("account is disabled"));
        }
        if applicant.payment_status().is_paid() {
            return Err(ApplicantError::invalid_transition("paid", "check out"));
        }

        let session = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                applicant_id: applicant.id,
                email: applicant.email.clone(),
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await
            .map_err(|e| {
                tracing::error!(applicant_id = %applicant.id, error = %e, "Checkout session creation failed");
                ApplicantError::payment_failed(e.message)
            })?;

        tracing::info!(applicant_id = %applicant.id, session_id = %session.id, "Checkout session created");
        Ok(CreateCheckoutResult { session })
    }
}
