//! Configuration failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that loaded but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Names the `MENTORHUB__`-relative key that must be set.
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    // server
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("server.host is not an IP address")]
    InvalidBindAddress,
    #[error("CORS origin {0:?} is not an http(s) origin")]
    InvalidCorsOrigin(String),
    #[error("timeout out of range")]
    InvalidTimeout,

    // database
    #[error("database.url must use the postgres:// scheme")]
    InvalidDatabaseUrl,
    #[error("database pool needs 1..=max connections with min <= max")]
    InvalidPoolSize,
    #[error("database.max_connections is above 100")]
    PoolSizeTooLarge,

    // payment
    #[error("a Stripe key without a webhook secret cannot verify payments")]
    IncompleteStripeConfig,
    #[error("payment.stripe_api_key must start with sk_")]
    InvalidStripeKey,
    #[error("payment.stripe_webhook_secret must start with whsec_")]
    InvalidStripeWebhookSecret,
    #[error("checkout redirect URLs must be http(s)")]
    InvalidCheckoutUrl,

    // email
    #[error("email.resend_api_key must start with re_")]
    InvalidResendKey,
    #[error("email.from_email is not an email address")]
    InvalidFromEmail,

    #[error("ai.base_url must be http(s)")]
    InvalidAiBaseUrl,
    #[error("auth.jwt_secret is shorter than 32 bytes")]
    JwtSecretTooShort,
    #[error("storage.attachments_public_url must be http(s)")]
    InvalidPublicUrl,
}

pub(crate) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
