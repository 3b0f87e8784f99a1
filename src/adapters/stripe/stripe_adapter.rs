//! Stripe Checkout adapter.
//!
//! Founders Circle is a one-time payment: checkout sessions are created in
//! `payment` mode against a single configured price. Confirmation lists the
//! customer's recent sessions and looks for a settled one.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::EmailAddress;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentConfirmation, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent,
};

use super::webhook::StripeWebhookVerifier;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// How many recent sessions to inspect when confirming.
const CONFIRM_LOOKBACK: &str = "10";

#[derive(Clone)]
pub struct StripeConfig {
    api_key: SecretString,
    webhook_secret: SecretString,
    /// Price of the Founders Circle product (price_...).
    price_id: String,
    api_base_url: String,
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: SecretString, webhook_secret: SecretString, price_id: impl Into<String>) -> Self {
        Self {
            api_key,
            webhook_secret,
            price_id: price_id.into(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            require_livemode: false,
        }
    }

    /// Point at a different API host (stripe-mock, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    payment_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeList<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
    verifier: StripeWebhookVerifier,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        let verifier = StripeWebhookVerifier::new(config.webhook_secret.clone())
            .with_require_livemode(config.require_livemode);
        Self {
            config,
            http_client: reqwest::Client::new(),
            verifier,
        }
    }

    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<StripeErrorBody>(&body).ok().map(|b| b.error);
        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| format!("Stripe API error ({})", status));

        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            400 | 404 => PaymentErrorCode::InvalidRequest,
            429 => PaymentErrorCode::RateLimited,
            _ => PaymentErrorCode::ProviderError,
        };
        tracing::error!(status = %status, error = %message, "Stripe request failed");

        let err = PaymentError::new(code, message);
        match detail.and_then(|d| d.code) {
            Some(provider_code) => err.with_provider_code(provider_code),
            None => err,
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let applicant_id = request.applicant_id.to_string();

        let params = [
            ("mode", "payment"),
            ("line_items[0][price]", self.config.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("customer_email", request.email.as_str()),
            ("client_reference_id", applicant_id.as_str()),
            ("metadata[applicant_id]", applicant_id.as_str()),
            ("success_url", request.success_url.as_str()),
            ("cancel_url", request.cancel_url.as_str()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let session: StripeSessionResponse = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;
        let session_url = session
            .url
            .ok_or_else(|| PaymentError::provider("Checkout session has no URL"))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session_url,
            expires_at: session.expires_at,
        })
    }

    async fn confirm_payment(
        &self,
        email: &EmailAddress,
    ) -> Result<PaymentConfirmation, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .query(&[
                ("customer_details[email]", email.as_str()),
                ("limit", CONFIRM_LOOKBACK),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let sessions: StripeList<StripeSessionResponse> = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let settled = sessions
            .data
            .into_iter()
            .find(|s| s.payment_status.as_deref() == Some("paid"));

        Ok(match settled {
            Some(session) => PaymentConfirmation::paid(session.id),
            None => PaymentConfirmation::unpaid(),
        })
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
    use crate::adapters::stripe::signature_header;
    use crate::ports::WebhookEventKind;

    fn adapter() -> StripePaymentAdapter {
        StripePaymentAdapter::new(StripeConfig::new(
            SecretString::new("sk_test_123".into()),
            SecretString::new("whsec_abc".into()),
            "price_founders",
        ))
    }

    #[test]
    fn session_list_parses_payment_status() {
        let json = r#"{"object":"list","data":[
            {"id":"cs_1","url":null,"payment_status":"unpaid"},
            {"id":"cs_2","url":null,"payment_status":"paid"}
        ]}"#;
        let list: StripeList<StripeSessionResponse> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[1].payment_status.as_deref(), Some("paid"));
    }

    #[tokio::test]
    async fn verify_webhook_uses_configured_secret() {
        let now = chrono::Utc::now().timestamp();
        let payload = serde_json::json!({
            "id": "evt_9", "type": "payment_intent.created", "created": now,
            "data": { "object": {} }
        })
        .to_string()
        .into_bytes();
        let header = signature_header("whsec_abc", now, &payload).unwrap();

        let event = adapter().verify_webhook(&payload, &header).await.unwrap();

        assert!(matches!(event.kind, WebhookEventKind::Other { .. }));
    }

    #[tokio::test]
    async fn unreachable_api_is_network_error() {
        let adapter = StripePaymentAdapter::new(
            StripeConfig::new(
                SecretString::new("sk_test_123".into()),
                SecretString::new("whsec_abc".into()),
                "price_founders",
            )
            .with_base_url("http://127.0.0.1:1"),
        );

        let err = adapter
            .confirm_payment(&EmailAddress::new("erin@example.com").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::NetworkError);
    }
}
