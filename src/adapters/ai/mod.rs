//! Answer rewriter adapters.
//!
//! - `OpenAiRewriter` - OpenAI-compatible chat completions
//! - `PassthroughRewriter` - Returns answers unchanged, for development

mod openai_rewriter;
mod passthrough_rewriter;

pub use openai_rewriter::{OpenAiRewriter, OpenAiRewriterConfig};
pub use passthrough_rewriter::PassthroughRewriter;
