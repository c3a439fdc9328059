//! ModelRegistry -- the process-wide "configured model" slot.
//!
//! Written only by the configuration-update path and read by every chat
//! turn. Readers clone the current `Arc` and keep using it for the whole
//! turn, so a concurrent reconfiguration is observed on the next turn, not
//! mid-turn. Concurrent `configure` calls race; the last one to finish wins.

use std::sync::{Arc, RwLock};

use neurochat_types::llm::{ConfigureOutcome, LlmError};
use tracing::{info, warn};

use super::box_provider::BoxLlmProvider;

/// Prompt used for the cheap key validation call.
const VALIDATION_PROMPT: &str = "test";

#[derive(Default)]
pub struct ModelRegistry {
    slot: RwLock<Option<Arc<BoxLlmProvider>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the installed provider, if any.
    pub fn current(&self) -> Option<Arc<BoxLlmProvider>> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_available(&self) -> bool {
        self.current().is_some()
    }

    /// Install a provider without validating it.
    pub fn install(&self, provider: BoxLlmProvider) {
        self.set(Some(Arc::new(provider)));
    }

    pub fn clear(&self) {
        self.set(None);
    }

    /// Validate and install a provider.
    ///
    /// `None` means no usable key was supplied. A key the provider rejects
    /// leaves the slot empty; any other validation failure (network, quota,
    /// timeout) installs the provider tentatively, since refusing a
    /// possibly-valid key on a transient failure would disable chat until
    /// the next reconfiguration.
    pub async fn configure(&self, provider: Option<BoxLlmProvider>) -> ConfigureOutcome {
        let Some(provider) = provider else {
            info!("No API key provided, model disabled");
            self.clear();
            return ConfigureOutcome::Disabled;
        };

        info!(provider = provider.name(), model = provider.model(), "Validating API key");
        match provider.generate(VALIDATION_PROMPT).await {
            Ok(_) => {
                info!("API key verified");
                self.install(provider);
                ConfigureOutcome::Ok
            }
            Err(LlmError::InvalidKey(message)) => {
                warn!(error = %message, "API key rejected by provider");
                self.clear();
                ConfigureOutcome::InvalidKey
            }
            Err(e) => {
                warn!(error = %e, "Key validation failed for a reason unrelated to the key, keeping model");
                self.install(provider);
                ConfigureOutcome::Unknown
            }
        }
    }

    fn set(&self, value: Option<Arc<BoxLlmProvider>>) {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    }
}
