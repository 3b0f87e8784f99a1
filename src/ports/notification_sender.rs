//! Notification sender port (transactional email).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EmailAddress};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: EmailAddress,
    pub to_name: String,
    pub subject: String,
    pub text_body: String,
}

/// Sends a notification to one recipient.
///
/// Callers treat sending as fire-and-forget: failures are logged, never
/// rolled back.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError>;
}
