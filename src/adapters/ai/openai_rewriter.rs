//! OpenAI-compatible answer rewriter.
//!
//! One chat-completion request per answer, issued in key order. Any
//! endpoint speaking the `/chat/completions` dialect works.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::ports::{AnswerRewriter, RewriteError};

const SYSTEM_PROMPT: &str = "You polish answers to a startup accelerator application. \
Rewrite the answer to be clear, specific and concise. Keep the applicant's facts and voice. \
Reply with the rewritten answer only.";

#[derive(Debug, Clone)]
pub struct OpenAiRewriterConfig {
    api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Retries on rate limits and 5xx, with exponential backoff.
    pub max_retries: u32,
}

impl OpenAiRewriterConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiRewriter {
    config: OpenAiRewriterConfig,
    client: Client,
}

impl OpenAiRewriter {
    pub fn new(config: OpenAiRewriterConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, answer: &str) -> Result<Response, RewriteError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: answer,
                },
            ],
            temperature: 0.3,
        };

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::provider(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    RewriteError::provider(format!("Connection failed: {}", e))
                }
            })
    }

    async fn parse(response: Response) -> Result<String, RewriteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => RewriteError::RateLimited,
                _ => RewriteError::provider(format!("Status {}: {}", status, body)),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::provider(format!("Failed to parse response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RewriteError::provider("Empty completion"))
    }

    async fn rewrite_one(&self, answer: &str) -> Result<String, RewriteError> {
        let mut attempt = 0;
        loop {
            let result = match self.send(answer).await {
                Ok(response) => Self::parse(response).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 << attempt);
                    tracing::debug!(attempt, error = %err, "Retrying rewrite");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl AnswerRewriter for OpenAiRewriter {
    async fn rewrite(
        &self,
        answers: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, RewriteError> {
        let mut rewritten = BTreeMap::new();
        for (key, answer) in answers {
            let text = if answer.trim().is_empty() {
                String::new()
            } else {
                self.rewrite_one(answer).await?
            };
            rewritten.insert(key.clone(), text);
        }
        tracing::info!(count = rewritten.len(), model = %self.config.model, "Answers rewritten");
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tolerates_trailing_slash() {
        let rewriter = OpenAiRewriter::new(
            OpenAiRewriterConfig::new(SecretString::new("sk".into()))
                .with_base_url("http://localhost:8080/v1/"),
        )
        .unwrap();
        assert_eq!(
            rewriter.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn chat_response_parses() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":" Better. "}}]}"#,
        )
        .unwrap();
        assert_eq!(body.choices[0].message.content.as_deref(), Some(" Better. "));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_provider_error() {
        let rewriter = OpenAiRewriter::new(
            OpenAiRewriterConfig::new(SecretString::new("sk".into()))
                .with_base_url("http://127.0.0.1:1")
                .with_max_retries(0),
        )
        .unwrap();
        let answers = BTreeMap::from([("pitch".to_string(), "we sell shoes".to_string())]);

        let err = rewriter.rewrite(&answers).await.unwrap_err();

        assert!(matches!(err, RewriteError::Provider(_)));
    }
}
