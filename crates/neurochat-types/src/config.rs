//! Externally editable configuration documents.
//!
//! Two JSON documents live in the data directory:
//! - `prompt.json`: behavior of the chat pipeline ([`PromptConfig`])
//! - `config.json`: provider secrets ([`SecretsConfig`])
//!
//! Every field has a default so partially written documents still load.

use serde::{Deserialize, Serialize};

/// Key value shipped in sample configs; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "Your-Gemini-API-Key-Here";

/// Prompt/behavior document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Preamble placed before the rendered conversation.
    #[serde(default)]
    pub system_prompt: String,

    /// Number of most recent messages sent to the model as context.
    #[serde(default = "default_memory_length")]
    pub memory_length: u32,

    /// Label prefixed to user turns in the rendered prompt.
    #[serde(default = "default_user_label")]
    pub user_label: String,

    /// Label prefixed to assistant turns and used as the trailing cue.
    #[serde(default = "default_assistant_label")]
    pub assistant_label: String,
}

fn default_memory_length() -> u32 {
    8
}

fn default_user_label() -> String {
    "User".to_string()
}

fn default_assistant_label() -> String {
    "Neuro".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::new(),
            memory_length: default_memory_length(),
            user_label: default_user_label(),
            assistant_label: default_assistant_label(),
        }
    }
}

impl PromptConfig {
    /// Context window size, never below one so the active turn is always sent.
    pub fn window(&self) -> u32 {
        self.memory_length.max(1)
    }
}

/// Secrets document.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretsConfig {
    #[serde(default)]
    pub gemini_api_key: String,
}

impl SecretsConfig {
    /// Whether a real key (not blank, not the sample placeholder) is present.
    pub fn has_api_key(&self) -> bool {
        let key = self.gemini_api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }
}

impl std::fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("gemini_api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_config_partial_document() {
        let config: PromptConfig =
            serde_json::from_str(r#"{"system_prompt": "You are Neuro."}"#).unwrap();
        assert_eq!(config.system_prompt, "You are Neuro.");
        assert_eq!(config.memory_length, 8);
        assert_eq!(config.user_label, "User");
        assert_eq!(config.assistant_label, "Neuro");
    }

    #[test]
    fn test_prompt_window_floor() {
        let config = PromptConfig {
            memory_length: 0,
            ..PromptConfig::default()
        };
        assert_eq!(config.window(), 1);
    }

    #[test]
    fn test_placeholder_key_is_not_a_key() {
        let secrets = SecretsConfig {
            gemini_api_key: PLACEHOLDER_API_KEY.to_string(),
        };
        assert!(!secrets.has_api_key());
        assert!(!SecretsConfig::default().has_api_key());
        let secrets = SecretsConfig {
            gemini_api_key: "AIza-real".to_string(),
        };
        assert!(secrets.has_api_key());
    }

    #[test]
    fn test_secrets_debug_redacts_key() {
        let secrets = SecretsConfig {
            gemini_api_key: "AIza-real".to_string(),
        };
        assert!(!format!("{secrets:?}").contains("AIza"));
    }
}
