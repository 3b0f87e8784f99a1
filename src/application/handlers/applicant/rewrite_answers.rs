//! RewriteAnswersHandler - AI-enhanced questionnaire answers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::ports::{AnswerRewriter, RewriteError};

#[derive(Debug, Clone)]
pub struct RewriteAnswersCommand {
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenAnswer {
    pub original: String,
    pub ai_enhanced: String,
}

#[derive(Debug, Clone)]
pub struct RewriteAnswersResult {
    /// Same keys as the input, in key order.
    pub answers: BTreeMap<String, RewrittenAnswer>,
}

/// Pairs every submitted answer with its rewrite.
///
/// The rewriter is opaque; this handler enforces that it returned exactly
/// the submitted keys.
pub struct RewriteAnswersHandler {
    rewriter: Arc<dyn AnswerRewriter>,
}

impl RewriteAnswersHandler {
    pub fn new(rewriter: Arc<dyn AnswerRewriter>) -> Self {
        Self { rewriter }
    }

    pub async fn handle(
        &self,
        cmd: RewriteAnswersCommand,
    ) -> Result<RewriteAnswersResult, RewriteError> {
        if cmd.answers.is_empty() {
            return Err(RewriteError::NoAnswers);
        }

        let mut rewritten = self.rewriter.rewrite(&cmd.answers).await?;

        let submitted: BTreeSet<&String> = cmd.answers.keys().collect();
        let returned: BTreeSet<&String> = rewritten.keys().collect();
        if submitted != returned {
            let missing = submitted.difference(&returned).map(|k| k.to_string()).collect();
            let unexpected = returned.difference(&submitted).map(|k| k.to_string()).collect();
            let err = RewriteError::Mismatch {
                missing,
                unexpected,
            };
            tracing::warn!(error = %err, "Rewriter broke the key contract");
            return Err(err);
        }

        let answers = cmd
            .answers
            .into_iter()
            .map(|(key, original)| {
                let ai_enhanced = rewritten.remove(&key).unwrap_or_default();
                (
                    key,
                    RewrittenAnswer {
                        original,
                        ai_enhanced,
                    },
                )
            })
            .collect();

        Ok(RewriteAnswersResult { answers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockAnswerRewriter;

    fn answers() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("problem".to_string(), "slow invoicing".to_string()),
            ("market".to_string(), "small shops".to_string()),
        ])
    }

    #[tokio::test]
    async fn pairs_each_answer_with_its_rewrite() {
        let handler = RewriteAnswersHandler::new(Arc::new(MockAnswerRewriter::default()));

        let result = handler
            .handle(RewriteAnswersCommand { answers: answers() })
            .await
            .unwrap();

        let keys: Vec<&String> = result.answers.keys().collect();
        assert_eq!(keys, vec!["market", "problem"]);
        assert_eq!(result.answers["problem"].original, "slow invoicing");
        assert_eq!(result.answers["problem"].ai_enhanced, "SLOW INVOICING");
    }

    #[tokio::test]
    async fn missing_key_is_a_mismatch() {
        let rewriter = MockAnswerRewriter {
            drop_key: Some("market".into()),
            ..MockAnswerRewriter::default()
        };
        let handler = RewriteAnswersHandler::new(Arc::new(rewriter));

        let err = handler
            .handle(RewriteAnswersCommand { answers: answers() })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RewriteError::Mismatch {
                missing: vec!["market".into()],
                unexpected: vec![],
            }
        );
    }

    #[tokio::test]
    async fn empty_input_never_reaches_rewriter() {
        let rewriter = Arc::new(MockAnswerRewriter::default());
        let handler = RewriteAnswersHandler::new(rewriter.clone());

        let err = handler
            .handle(RewriteAnswersCommand {
                answers: BTreeMap::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, RewriteError::NoAnswers);
        assert_eq!(*rewriter.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let rewriter = MockAnswerRewriter {
            fail: true,
            ..MockAnswerRewriter::default()
        };
        let handler = RewriteAnswersHandler::new(Arc::new(rewriter));

        let err = handler
            .handle(RewriteAnswersCommand { answers: answers() })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
