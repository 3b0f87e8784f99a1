//! Hosted checkout for the one-time Founders Circle purchase.
//!
//! Confirming an email that has already paid is harmless; the applicant
//! record is the source of truth once payment is recorded.

use crate::domain::foundation::{ApplicantId, DomainError, EmailAddress, ErrorCategory, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session. Returns the URL to redirect to.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Ask the provider whether `email` has completed a checkout.
    async fn confirm_payment(
        &self,
        email: &EmailAddress,
    ) -> Result<PaymentConfirmation, PaymentError>;

    /// Verify a webhook signature and parse the event.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Stored on the session as the client reference.
    pub applicant_id: ApplicantId,
    pub email: EmailAddress,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
    /// Unix timestamp, when the provider reports one.
    pub expires_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub paid: bool,
    /// Session that settled the payment.
    pub session_id: Option<String>,
}

impl PaymentConfirmation {
    pub fn unpaid() -> Self {
        Self {
            paid: false,
            session_id: None,
        }
    }

    pub fn paid(session_id: impl Into<String>) -> Self {
        Self {
            paid: true,
            session_id: Some(session_id.into()),
        }
    }
}

/// Verified webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    pub kind: WebhookEventKind,
    /// Unix timestamp.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WebhookEventKind {
    CheckoutCompleted {
        session_id: String,
        customer_email: Option<String>,
        client_reference_id: Option<String>,
        paid: bool,
    },
    /// Any event type we do not act on.
    Other { event_type: String },
}

/// A provider call that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
    /// Stripe's `error.code`, when the response carried one.
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Worth asking the provider again later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.code,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::RateLimited
                | PaymentErrorCode::ProviderError
        )
    }

    /// The `ErrorCode` this failure surfaces as outside the payment port.
    pub fn domain_code(&self) -> ErrorCode {
        match self.code {
            PaymentErrorCode::InvalidWebhook => ErrorCode::Unauthorized,
            PaymentErrorCode::InvalidRequest => ErrorCode::ValidationFailed,
            _ => ErrorCode::PaymentFailed,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.domain_code().category()
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(err.domain_code(), err.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,
    InvalidRequest,
    InvalidWebhook,
    RateLimited,
    ProviderError,
}

impl PaymentErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::AuthenticationError => "authentication_error",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidWebhook => "invalid_webhook",
            Self::RateLimited => "rate_limited",
            Self::ProviderError => "provider_error",
        }
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_follows_code() {
        assert!(PaymentError::network("timeout").is_retryable());
        assert!(PaymentError::new(PaymentErrorCode::RateLimited, "slow down").is_retryable());
        assert!(!PaymentError::new(PaymentErrorCode::AuthenticationError, "bad key").is_retryable());
        assert!(!PaymentError::invalid_webhook("sig").is_retryable());
    }

    #[test]
    fn display_leads_with_the_code() {
        let err = PaymentError::provider("upstream 502").with_provider_code("api_error");
        assert_eq!(err.to_string(), "provider_error: upstream 502");
    }

    #[test]
    fn invalid_webhook_maps_to_unauthorized() {
        let err: DomainError = PaymentError::invalid_webhook("bad signature").into();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn webhook_failures_are_permission_errors() {
        assert_eq!(
            PaymentError::invalid_webhook("stale").category(),
            ErrorCategory::Permission
        );
    }

    #[test]
    fn provider_failures_map_to_payment_failed() {
        let err: DomainError = PaymentError::provider("500").into();
        assert_eq!(err.code, ErrorCode::PaymentFailed);
    }

    #[test]
    fn webhook_kind_serializes_with_type_tag() {
        let kind = WebhookEventKind::Other {
            event_type: "invoice.paid".into(),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "other");
    }
}
