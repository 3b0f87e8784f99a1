//! Answer rewriting through an OpenAI-compatible chat endpoint.

use serde::Deserialize;
use std::time::Duration;

use super::error::{is_http_url, ValidationError};

/// With no key, answers pass through unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub openai_api_key: Option<String>,
    pub model: String,
    /// Anything serving `/chat/completions`, e.g. a local proxy.
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts after a rate limit or 5xx.
    pub max_retries: u32,
}

impl AiConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            Err(ValidationError::InvalidAiBaseUrl)
        } else if self.timeout_secs == 0 {
            Err(ValidationError::InvalidTimeout)
        } else {
            Ok(())
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_unless_keyed() {
        let mut config = AiConfig::default();
        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());

        config.openai_api_key = Some("sk-proj-abc".to_string());
        assert_eq!(config.api_key(), Some("sk-proj-abc"));
    }

    #[test]
    fn base_url_needs_a_scheme() {
        let config = AiConfig {
            base_url: "localhost:11434/v1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiBaseUrl));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        assert_eq!(AiConfig::default().timeout(), Duration::from_secs(30));
    }
}
