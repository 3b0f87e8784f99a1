//! Authentication types for the domain layer.
//!
//! These types represent an authenticated actor extracted from a session
//! token. They have no provider dependencies; the `SessionValidator` port
//! populates them.

use super::{ActorRole, EmailAddress};
use thiserror::Error;

/// Actor extracted from a validated session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: EmailAddress,
    pub name: String,
    pub role: ActorRole,
}

impl AuthenticatedUser {
    pub fn new(email: EmailAddress, name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            email,
            name: name.into(),
            role,
        }
    }

    /// Returns the display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        if self.name.trim().is_empty() {
            self.email.as_str()
        } else {
            &self.name
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Actor is authenticated but lacks the role required for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the actor should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
