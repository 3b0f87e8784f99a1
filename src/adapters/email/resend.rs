//! Resend e-mail sender.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, NotificationSender};

const DEFAULT_API_BASE: &str = "https://api.resend.com";

#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    /// `Name <address>` header value.
    from: String,
    api_base_url: String,
}

impl ResendConfig {
    pub fn new(api_key: SecretString, from: impl Into<String>) -> Self {
        Self {
            api_key,
            from: from.into(),
            api_base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<String>,
    subject: &'a str,
    text: &'a str,
}

pub struct ResendNotificationSender {
    config: ResendConfig,
    client: reqwest::Client,
}

impl ResendNotificationSender {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn recipient(notification: &Notification) -> String {
        if notification.to_name.trim().is_empty() {
            notification.to.to_string()
        } else {
            format!("{} <{}>", notification.to_name.trim(), notification.to)
        }
    }
}

#[async_trait]
impl NotificationSender for ResendNotificationSender {
    async fn send(&self, notification: &Notification) -> Result<(), DomainError> {
        let request = SendEmailRequest {
            from: &self.config.from,
            to: vec![Self::recipient(notification)],
            subject: &notification.subject,
            text: &notification.text_body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.config.api_base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationFailed,
                    format!("Email request failed: {}", e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                format!("Resend returned {}: {}", status, body),
            ));
        }

        tracing::debug!(to = %notification.to, subject = %notification.subject, "Email sent");
        Ok(())
    }
}
