//! Stripe webhook signature verification and event parsing.
//!
//! The `Stripe-Signature` header carries `t=<unix>,v1=<hex hmac>`. The
//! signed payload is `"{t}.{body}"`, HMAC-SHA256 keyed with the endpoint
//! secret. Events older than five minutes are rejected.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{PaymentError, WebhookEvent, WebhookEventKind};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps.
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    /// Every `v1` signature present; Stripe sends several during secret rotation.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, PaymentError> {
        let mut timestamp = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| PaymentError::invalid_webhook("Malformed signature header"))?;
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        PaymentError::invalid_webhook("Invalid signature timestamp")
                    })?);
                }
                "v1" => {
                    let bytes = hex::decode(value)
                        .map_err(|_| PaymentError::invalid_webhook("Invalid signature hex"))?;
                    v1_signatures.push(bytes);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| PaymentError::invalid_webhook("Missing signature timestamp"))?;
        if v1_signatures.is_empty() {
            return Err(PaymentError::invalid_webhook("Missing v1 signature"));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StripeEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    #[serde(default)]
    livemode: bool,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutObject {
    id: String,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    client_reference_id: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    #[serde(default)]
    email: Option<String>,
}

pub struct StripeWebhookVerifier {
    secret: SecretString,
    require_livemode: bool,
}

impl StripeWebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            require_livemode: false,
        }
    }

    /// Reject test-mode events.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<WebhookEvent, PaymentError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<WebhookEvent, PaymentError> {
        let header = SignatureHeader::parse(signature_header)?;

        let age = now - header.timestamp;
        if age > MAX_EVENT_AGE_SECS {
            tracing::warn!(age_secs = age, "Webhook event too old");
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            tracing::warn!(event_timestamp = header.timestamp, now, "Webhook event from the future");
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let expected = compute_signature(self.secret.expose_secret(), header.timestamp, payload)?;
        let matched = header
            .v1_signatures
            .iter()
            .any(|sig| sig.len() == expected.len() && bool::from(sig.as_slice().ct_eq(&expected)));
        if !matched {
            tracing::warn!("Invalid webhook signature");
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        self.parse_event(payload)
    }

    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid JSON: {}", e)))?;

        if self.require_livemode && !event.livemode {
            tracing::warn!(event_id = %event.id, "Rejected test mode event");
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed",
            ));
        }

        let kind = match event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutObject = serde_json::from_value(event.data.object)
                    .map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;
                let customer_email = session
                    .customer_details
                    .and_then(|d| d.email)
                    .or(session.customer_email);
                WebhookEventKind::CheckoutCompleted {
                    session_id: session.id,
                    customer_email,
                    client_reference_id: session.client_reference_id,
                    paid: session.payment_status.as_deref() == Some("paid"),
                }
            }
            other => WebhookEventKind::Other {
                event_type: other.to_string(),
            },
        };

        Ok(WebhookEvent {
            id: event.id,
            kind,
            created_at: event.created,
        })
    }
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, PaymentError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| PaymentError::invalid_webhook("Unusable webhook secret"))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Builds a `Stripe-Signature` header value for `payload`.
///
/// Used to exercise the webhook endpoint locally and in tests.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, PaymentError> {
    let signature = compute_signature(secret, timestamp, payload)?;
    Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_760_000_000;

    fn verifier() -> StripeWebhookVerifier {
        StripeWebhookVerifier::new(SecretString::new(SECRET.to_string()))
    }

    fn checkout_payload() -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": NOW,
            "livemode": false,
            "data": { "object": {
                "id": "cs_1",
                "customer_details": { "email": "erin@example.com" },
                "client_reference_id": "7f1c2a8e-0000-4000-8000-000000000001",
                "payment_status": "paid"
            }}
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn parses_header_with_multiple_v1() {
        let sig = "ab".repeat(32);
        let header =
            SignatureHeader::parse(&format!("t=123,v1={},v1={},v0=zz", sig, sig)).unwrap();
        assert_eq!(header.timestamp, 123);
        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn header_without_timestamp_is_rejected() {
        assert!(SignatureHeader::parse(&format!("v1={}", "ab".repeat(32))).is_err());
        assert!(SignatureHeader::parse("t=123").is_err());
        assert!(SignatureHeader::parse("garbage").is_err());
    }

    #[test]
    fn valid_signature_yields_checkout_completed() {
        let payload = checkout_payload();
        let header = signature_header(SECRET, NOW, &payload).unwrap();

        let event = verifier().verify_at(&payload, &header, NOW + 10).unwrap();

        assert_eq!(event.id, "evt_1");
        match event.kind {
            WebhookEventKind::CheckoutCompleted {
                session_id,
                customer_email,
                paid,
                ..
            } => {
                assert_eq!(session_id, "cs_1");
                assert_eq!(customer_email.as_deref(), Some("erin@example.com"));
                assert!(paid);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let payload = checkout_payload();
        let header = signature_header("whsec_other", NOW, &payload).unwrap();

        let err = verifier().verify_at(&payload, &header, NOW).unwrap_err();

        assert_eq!(err.code, crate::ports::PaymentErrorCode::InvalidWebhook);
    }

    #[test]
    fn tampered_body_is_rejected() {
        let payload = checkout_payload();
        let header = signature_header(SECRET, NOW, &payload).unwrap();
        let mut tampered = payload.clone();
        tampered.push(b' ');

        assert!(verifier().verify_at(&tampered, &header, NOW).is_err());
    }

    #[test]
    fn stale_and_future_events_are_rejected() {
        let payload = checkout_payload();
        let header = signature_header(SECRET, NOW, &payload).unwrap();

        assert!(verifier().verify_at(&payload, &header, NOW + 301).is_err());
        assert!(verifier().verify_at(&payload, &header, NOW - 61).is_err());
        assert!(verifier().verify_at(&payload, &header, NOW + 300).is_ok());
    }

    #[test]
    fn unknown_event_types_pass_through_as_other() {
        let payload = serde_json::json!({
            "id": "evt_2", "type": "invoice.paid", "created": NOW,
            "data": { "object": {} }
        })
        .to_string()
        .into_bytes();
        let header = signature_header(SECRET, NOW, &payload).unwrap();

        let event = verifier().verify_at(&payload, &header, NOW).unwrap();

        assert_eq!(
            event.kind,
            WebhookEventKind::Other {
                event_type: "invoice.paid".into()
            }
        );
    }

    #[test]
    fn livemode_requirement_rejects_test_events() {
        let payload = checkout_payload();
        let header = signature_header(SECRET, NOW, &payload).unwrap();

        let strict = verifier().with_require_livemode(true);

        assert!(strict.verify_at(&payload, &header, NOW).is_err());
    }
}
