//! Model provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait from
//! `neurochat-core`, plus the factory that turns the configured API key
//! into an installable [`BoxLlmProvider`].
//!
//! [`LlmProvider`]: neurochat_core::llm::provider::LlmProvider

pub mod gemini;

use std::time::Duration;

use neurochat_core::llm::box_provider::BoxLlmProvider;
use neurochat_types::config::SecretsConfig;
use neurochat_types::llm::LlmError;
use secrecy::SecretString;

use self::gemini::GeminiProvider;
use self::gemini::client::{DEFAULT_MODEL, DEFAULT_TIMEOUT};

/// Process-level settings for building the model client.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub request_timeout: Duration,
    /// Overrides the public endpoint when set.
    pub base_url: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            base_url: None,
        }
    }
}

/// Build a provider for the configured key.
///
/// Returns `Ok(None)` when there is no usable key (blank or the sample
/// placeholder), so the caller can disable chat without a network call.
pub fn create_provider(
    secrets: &SecretsConfig,
    settings: &ModelSettings,
) -> Result<Option<BoxLlmProvider>, LlmError> {
    if !secrets.has_api_key() {
        return Ok(None);
    }

    let key = SecretString::from(secrets.gemini_api_key.trim().to_string());
    let mut provider = GeminiProvider::new(key, settings.model.clone(), settings.request_timeout)?;
    if let Some(base_url) = &settings.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    Ok(Some(BoxLlmProvider::new(provider)))
}
