//! Configuration documents in the data directory.
//!
//! `ConfigStore` owns `prompt.json` and `config.json` behind locks. Readers
//! get cloned snapshots, so a concurrent update is seen on the next read and
//! never half-applied. Missing or malformed files log a warning and fall
//! back to defaults.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use neurochat_types::config::{PromptConfig, SecretsConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const PROMPT_FILE: &str = "prompt.json";
pub const SECRETS_FILE: &str = "config.json";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "NEUROCHAT_DATA_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Resolve the data directory.
///
/// Priority: `NEUROCHAT_DATA_DIR`, then `~/.neurochat`, then `./.neurochat`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".neurochat"))
        .unwrap_or_else(|| PathBuf::from(".neurochat"))
}

/// Load a JSON document, falling back to `T::default()` on any failure.
pub async fn load_json_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("{} not found, using defaults", path.display());
            return T::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return T::default();
        }
    };

    match serde_json::from_str::<T>(&content) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("{} is empty or corrupted ({err}), using defaults", path.display());
            T::default()
        }
    }
}

/// Write a JSON document (pretty-printed), creating the parent directory.
pub async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Process-wide holder of the prompt and secrets documents.
pub struct ConfigStore {
    data_dir: PathBuf,
    prompt: RwLock<PromptConfig>,
    secrets: RwLock<SecretsConfig>,
}

impl ConfigStore {
    /// Load both documents from `data_dir`.
    pub async fn load(data_dir: impl Into<PathBuf>) -> Self {
        let store = Self {
            data_dir: data_dir.into(),
            prompt: RwLock::new(PromptConfig::default()),
            secrets: RwLock::new(SecretsConfig::default()),
        };
        store.reload().await;
        store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn prompt_path(&self) -> PathBuf {
        self.data_dir.join(PROMPT_FILE)
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.data_dir.join(SECRETS_FILE)
    }

    /// Re-read both documents from disk.
    pub async fn reload(&self) {
        let prompt: PromptConfig = load_json_or_default(&self.prompt_path()).await;
        let secrets: SecretsConfig = load_json_or_default(&self.secrets_path()).await;

        tracing::info!(
            memory_length = prompt.memory_length,
            has_system_prompt = !prompt.system_prompt.is_empty(),
            has_api_key = secrets.has_api_key(),
            "Configuration loaded"
        );

        *self.prompt.write().unwrap_or_else(|p| p.into_inner()) = prompt;
        *self.secrets.write().unwrap_or_else(|p| p.into_inner()) = secrets;
    }

    pub fn prompt(&self) -> PromptConfig {
        self.prompt.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn secrets(&self) -> SecretsConfig {
        self.secrets.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Apply a submitted key and persist the secrets document.
    ///
    /// The document is rewritten even when the key is absent or unchanged.
    /// The in-memory key only changes once the write has succeeded. Returns
    /// whether the key changed.
    pub async fn update_api_key(&self, key: Option<&str>) -> Result<bool, ConfigError> {
        let mut candidate = self.secrets();
        let changed = match key {
            Some(key) if key != candidate.gemini_api_key => {
                candidate.gemini_api_key = key.to_string();
                true
            }
            _ => false,
        };

        save_json(&self.secrets_path(), &candidate).await?;

        if changed {
            *self.secrets.write().unwrap_or_else(|p| p.into_inner()) = candidate;
            tracing::info!("API key updated");
        }
        Ok(changed)
    }
}
