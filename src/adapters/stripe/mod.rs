//! Stripe payment adapters.
//!
//! - `StripePaymentAdapter` - Hosted Checkout over the Stripe REST API
//! - `MockPaymentProvider` - In-process provider for development
//! - `StripeWebhookVerifier` - `Stripe-Signature` HMAC check, shared by both
//!
//! Secrets are held as `secrecy::SecretString` and never logged.

mod mock_payment_provider;
mod stripe_adapter;
mod webhook;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use webhook::{signature_header, SignatureHeader, StripeWebhookVerifier};
