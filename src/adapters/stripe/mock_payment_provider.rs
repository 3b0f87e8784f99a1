//! In-process payment provider for development and tests.
//!
//! Checkout "completes" when `mark_paid` is called for the email. Webhooks
//! are verified with the real signature check so the endpoint can be
//! exercised end to end.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::EmailAddress;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentConfirmation, PaymentError, PaymentProvider,
    WebhookEvent,
};

use super::webhook::StripeWebhookVerifier;

#[derive(Default)]
struct MockState {
    paid: HashSet<String>,
    checkouts: Vec<CreateCheckoutRequest>,
}

pub struct MockPaymentProvider {
    verifier: StripeWebhookVerifier,
    state: Mutex<MockState>,
}

impl MockPaymentProvider {
    pub fn new(webhook_secret: SecretString) -> Self {
        Self {
            verifier: StripeWebhookVerifier::new(webhook_secret),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Record a completed checkout for `email`.
    pub fn mark_paid(&self, email: &EmailAddress) {
        self.lock().paid.insert(email.as_str().to_string());
    }

    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.lock().checkouts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.lock();
        let id = format!("cs_mock_{}", state.checkouts.len() + 1);
        let url = format!("{}?session_id={}", request.success_url, id);
        tracing::debug!(email = %request.email, session_id = %id, "Mock checkout created");
        state.checkouts.push(request);
        Ok(CheckoutSession {
            id,
            url,
            expires_at: None,
        })
    }

    async fn confirm_payment(
        &self,
        email: &EmailAddress,
    ) -> Result<PaymentConfirmation, PaymentError> {
        if self.lock().paid.contains(email.as_str()) {
            Ok(PaymentConfirmation::paid(format!("cs_mock_{}", email)))
        } else {
            Ok(PaymentConfirmation::unpaid())
        }
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.verifier.verify(payload, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ApplicantId;

    fn provider() -> MockPaymentProvider {
        MockPaymentProvider::new(SecretString::new("whsec_dev".into()))
    }

    #[tokio::test]
    async fn unpaid_until_marked() {
        let provider = provider();
        let email = EmailAddress::new("erin@example.com").unwrap();

        assert!(!provider.confirm_payment(&email).await.unwrap().paid);
        provider.mark_paid(&email);
        assert!(provider.confirm_payment(&email).await.unwrap().paid);
    }

    #[tokio::test]
    async fn checkout_is_recorded() {
        let provider = provider();

        let session = provider
            .create_checkout_session(CreateCheckoutRequest {
                applicant_id: ApplicantId::new(),
                email: EmailAddress::new("erin@example.com").unwrap(),
                success_url: "https://app.example.com/paid".into(),
                cancel_url: "https://app.example.com/cancel".into(),
            })
            .await
            .unwrap();

        assert_eq!(session.id, "cs_mock_1");
        assert!(session.url.starts_with("https://app.example.com/paid"));
        assert_eq!(provider.checkout_requests().len(), 1);
    }
}
