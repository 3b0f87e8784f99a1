//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Session token configuration (HS256 JWTs)
///
/// In development the secret may be omitted; the server then starts with an
/// empty mock validator and every bearer token is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for session tokens
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Expected `iss` claim
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl AuthConfig {
    /// The secret, if one is configured and non-blank.
    pub fn secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match self.secret() {
            Some(secret) if secret.len() < 32 => Err(ValidationError::JwtSecretTooShort),
            Some(_) => Ok(()),
            None if *environment == Environment::Production => {
                Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
            }
            None => Ok(()),
        }
    }
}
