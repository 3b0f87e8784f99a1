//! Answer rewriter port - an opaque AI text transform over questionnaire answers.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::{ErrorCategory, ErrorCode};

/// Rewrites questionnaire answers.
///
/// The output must hold exactly the input keys; the caller enforces this.
#[async_trait]
pub trait AnswerRewriter: Send + Sync {
    async fn rewrite(
        &self,
        answers: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, RewriteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("No answers to rewrite")]
    NoAnswers,

    /// Rewriter returned a different key set than it was given.
    #[error("Rewritten answers do not match the submitted keys (missing: {missing:?}, unexpected: {unexpected:?})")]
    Mismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Rewrite service rate limited")]
    RateLimited,

    #[error("Rewrite service failed: {0}")]
    Provider(String),
}

impl RewriteError {
    pub fn provider(message: impl Into<String>) -> Self {
        RewriteError::Provider(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RewriteError::NoAnswers => ErrorCode::ValidationFailed,
            _ => ErrorCode::RewriteFailed,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, RewriteError::RateLimited | RewriteError::Provider(_))
    }
}
