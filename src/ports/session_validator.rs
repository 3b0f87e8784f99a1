//! Session validation port.
//!
//! The external auth provider issues a session token; implementations check
//! it and map its claims onto an `AuthenticatedUser`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates session tokens and extracts the actor.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens, bad signatures and
///   unknown roles
/// - `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
