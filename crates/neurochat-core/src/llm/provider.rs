//! LlmProvider trait definition.
//!
//! This is the boundary to the hosted generative-text API. A provider is
//! stateless apart from its credentials; it never retries on its own.

use neurochat_types::llm::{GenerationOutcome, LlmError};

/// Trait for model provider backends (Gemini, test doubles, ...).
///
/// Implementations live in neurochat-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Generate a reply for a single linear prompt.
    ///
    /// Successful calls are reduced to a [`GenerationOutcome`] tag; failed
    /// calls to an [`LlmError`] class.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GenerationOutcome, LlmError>> + Send;
}
