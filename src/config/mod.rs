//! Typed settings for the MentorHub server.
//!
//! Everything is read from `MENTORHUB__`-prefixed environment variables
//! (with `.env` honoured in development); `__` separates the section from
//! the key, so `MENTORHUB__SERVER__PORT=3000` sets `server.port`.
//!
//! All sections default to a local development setup: no database, no
//! Stripe, no Resend, no OpenAI. [`AppConfig::validate`] is where
//! production gets strict.
//!
//! ```no_run
//! use mentorhub::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), mentorhub::config::ConfigError>(())
//! ```

mod ai;
mod auth;
mod database;
mod email;
mod error;
mod payment;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "MENTORHUB";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub ai: AiConfig,
    pub payment: PaymentConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    ///
    /// Only parsing happens here; call [`validate`](Self::validate) before
    /// using the result.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(None)
    }

    /// `vars` replaces the process environment when given.
    fn from_vars(vars: Option<config::Map<String, String>>) -> Result<Self, ConfigError> {
        let source = config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(vars);
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Checks every section, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.payment.validate()?;
        self.email.validate()?;
        self.storage.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(Some(map)).unwrap()
    }

    #[test]
    fn nothing_set_is_a_valid_development_setup() {
        let config = load(&[]);

        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url().is_none());
        assert!(!config.payment.is_stripe_enabled());
        assert!(config.email.api_key().is_none());
        assert!(config.ai.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_keys_reach_their_sections() {
        let config = load(&[
            ("MENTORHUB__SERVER__PORT", "3000"),
            ("MENTORHUB__DATABASE__URL", "postgres://mh@localhost/mentorhub"),
            ("MENTORHUB__DATABASE__MAX_CONNECTIONS", "4"),
            ("MENTORHUB__PAYMENT__STRIPE_API_KEY", "sk_test_abc"),
            ("MENTORHUB__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_abc"),
            ("MENTORHUB__PAYMENT__STRIPE_PRICE_ID", "price_founders"),
            ("MENTORHUB__EMAIL__RESEND_API_KEY", "re_abc"),
        ]);

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url(), Some("postgres://mh@localhost/mentorhub"));
        assert_eq!(config.database.max_connections, 4);
        assert!(config.payment.is_test_mode());
        assert_eq!(config.email.api_key(), Some("re_abc"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unprefixed_variables_are_ignored() {
        let config = load(&[("SERVER__PORT", "9999")]);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn production_needs_a_jwt_secret() {
        let base = [
            ("MENTORHUB__SERVER__ENVIRONMENT", "production"),
            ("MENTORHUB__SERVER__CORS_ORIGINS", "https://app.mentorhub.app"),
        ];
        let config = load(&base);
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );

        let mut with_secret = base.to_vec();
        with_secret.push((
            "MENTORHUB__AUTH__JWT_SECRET",
            "0123456789abcdef0123456789abcdef",
        ));
        assert!(load(&with_secret).validate().is_ok());
    }

    #[test]
    fn first_invalid_section_is_reported() {
        let config = load(&[
            ("MENTORHUB__DATABASE__URL", "mysql://localhost/mentorhub"),
            ("MENTORHUB__EMAIL__RESEND_API_KEY", "bad"),
        ]);
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
