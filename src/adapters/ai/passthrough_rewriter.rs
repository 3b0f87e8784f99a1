//! Development rewriter that trims whitespace and returns the answers as-is.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::ports::{AnswerRewriter, RewriteError};

#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughRewriter;

#[async_trait]
impl AnswerRewriter for PassthroughRewriter {
    async fn rewrite(
        &self,
        answers: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, RewriteError> {
        Ok(answers
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect())
    }
}
