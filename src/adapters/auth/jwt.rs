//! HS256 session-token validator.
//!
//! The external auth provider signs session tokens with a shared secret.
//! Claims carry the actor's `email`, `name` and `role` (`admin` or an
//! applicant role).

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActorRole, AuthError, AuthenticatedUser, EmailAddress};
use crate::ports::SessionValidator;

/// Claims expected in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

#[derive(Clone)]
pub struct JwtConfig {
    secret: SecretString,
    issuer: Option<String>,
    audience: Option<String>,
    /// Clock skew allowance for `exp`.
    leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            issuer: None,
            audience: None,
            leeway_secs: 30,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }
}

pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp"]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Session token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Session token rejected: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let email = EmailAddress::new(&claims.email).map_err(|e| {
            tracing::warn!("Session token carries an invalid email: {}", e);
            AuthError::InvalidToken
        })?;
        let role: ActorRole = claims.role.parse().map_err(|_| {
            tracing::warn!(role = %claims.role, "Session token carries an unknown role");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(email, claims.name, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "session-secret";

    fn token(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: &str, exp_offset: i64) -> SessionClaims {
        SessionClaims {
            email: "Erin@Example.com".into(),
            name: "Erin".into(),
            role: role.into(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            iss: None,
            aud: None,
        }
    }

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(SecretString::new(SECRET.into())))
    }

    #[tokio::test]
    async fn valid_token_yields_actor() {
        let user = validator()
            .validate(&token(&claims("entrepreneur", 600), SECRET))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "erin@example.com");
        assert_eq!(user.role, ActorRole::Entrepreneur);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let err = validator()
            .validate(&token(&claims("mentor", -3600), SECRET))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_role_are_invalid() {
        let bad_sig = validator()
            .validate(&token(&claims("admin", 600), "other"))
            .await
            .unwrap_err();
        let bad_role = validator()
            .validate(&token(&claims("superuser", 600), SECRET))
            .await
            .unwrap_err();

        assert!(matches!(bad_sig, AuthError::InvalidToken));
        assert!(matches!(bad_role, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn issuer_is_enforced_when_configured() {
        let validator = JwtSessionValidator::new(
            JwtConfig::new(SecretString::new(SECRET.into())).with_issuer("https://auth.example.com"),
        );
        let mut c = claims("coach", 600);
        c.iss = Some("https://evil.example.com".into());

        assert!(validator.validate(&token(&c, SECRET)).await.is_err());
    }
}
