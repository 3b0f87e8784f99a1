//! Notification sender that only logs. Used when no e-mail API is configured.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, NotificationSender};

#[derive(Debug, Default)]
pub struct LoggingNotificationSender {
    sent: Mutex<Vec<Notification>>,
}

impl LoggingNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything "sent" so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NotificationSender for LoggingNotificationSender {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            "Email (not sent, logging sender)"
        );
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
        Ok(())
    }
}
