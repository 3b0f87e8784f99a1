//! Payment configuration

use serde::Deserialize;

use super::error::{is_http_url, ValidationError};

/// Payment configuration (Stripe)
///
/// With no API key the binary falls back to the mock provider, which still
/// verifies webhook signatures against `stripe_webhook_secret` (or a
/// development default).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    #[serde(default)]
    pub stripe_api_key: Option<String>,

    /// Stripe webhook signing secret
    #[serde(default)]
    pub stripe_webhook_secret: Option<String>,

    /// Price of the Founders Circle upgrade
    #[serde(default)]
    pub stripe_price_id: Option<String>,

    /// Reject webhook events that are not live-mode
    #[serde(default)]
    pub require_livemode: bool,

    /// Where Stripe sends the entrepreneur after paying
    #[serde(default = "default_success_url")]
    pub success_url: String,

    /// Where Stripe sends the entrepreneur after abandoning checkout
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
}

impl PaymentConfig {
    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.stripe_api_key.as_deref().filter(|k| !k.is_empty())
    }

    fn webhook_secret(&self) -> Option<&str> {
        self.stripe_webhook_secret.as_deref().filter(|k| !k.is_empty())
    }

    /// True when real Stripe credentials are configured.
    pub fn is_stripe_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.api_key().is_some_and(|k| k.starts_with("sk_test_"))
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.api_key().is_some_and(|k| k.starts_with("sk_live_"))
    }

    /// Secret for webhook verification, with a development fallback.
    pub fn webhook_secret_or_default(&self) -> String {
        self.webhook_secret()
            .unwrap_or("whsec_development")
            .to_string()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.api_key(), self.webhook_secret()) {
            (Some(key), Some(secret)) => {
                // Verify key prefixes for safety
                if !key.starts_with("sk_") {
                    return Err(ValidationError::InvalidStripeKey);
                }
                if !secret.starts_with("whsec_") {
                    return Err(ValidationError::InvalidStripeWebhookSecret);
                }
                if self.stripe_price_id.as_deref().map_or(true, str::is_empty) {
                    return Err(ValidationError::MissingRequired("STRIPE_PRICE_ID"));
                }
            }
            (Some(_), None) => return Err(ValidationError::IncompleteStripeConfig),
            (None, Some(secret)) if !secret.starts_with("whsec_") => {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
            _ => {}
        }

        if !is_http_url(&self.success_url) || !is_http_url(&self.cancel_url) {
            return Err(ValidationError::InvalidCheckoutUrl);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: None,
            stripe_webhook_secret: None,
            stripe_price_id: None,
            require_livemode: false,
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
        }
    }
}

fn default_success_url() -> String {
    "http://localhost:5173/payment/success".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:5173/payment/cancel".to_string()
}
