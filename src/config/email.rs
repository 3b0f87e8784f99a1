//! Outbound notification email (Resend).

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::EmailAddress;

/// Without a Resend key, notifications are written to the log instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub resend_api_key: Option<String>,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.resend_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// `Name <address>`, as Resend expects in `from`.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_some_and(|k| !k.starts_with("re_")) {
            return Err(ValidationError::InvalidResendKey);
        }
        EmailAddress::new(&self.from_email).map_err(|_| ValidationError::InvalidFromEmail)?;
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: "noreply@mentorhub.app".to_string(),
            from_name: "MentorHub".to_string(),
        }
    }
}
