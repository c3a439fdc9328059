//! Application state wiring all services together.
//!
//! Services are generic over their port traits; AppState pins them to the
//! concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use neurochat_core::auth::service::AuthService;
use neurochat_core::chat::service::ChatService;
use neurochat_core::llm::registry::ModelRegistry;
use neurochat_infra::config::ConfigStore;
use neurochat_infra::crypto::password::Argon2CredentialHasher;
use neurochat_infra::crypto::token::RandomSessionTokens;
use neurochat_infra::llm::{ModelSettings, create_provider};
use neurochat_infra::sqlite::message::SqliteMessageRepository;
use neurochat_infra::sqlite::pool::{DatabasePool, database_url};
use neurochat_infra::sqlite::session::SqliteSessionRepository;
use neurochat_infra::sqlite::user::SqliteUserRepository;
use neurochat_types::llm::ConfigureOutcome;

pub type ConcreteAuthService = AuthService<
    SqliteUserRepository,
    SqliteSessionRepository,
    Argon2CredentialHasher,
    RandomSessionTokens,
>;

pub type ConcreteChatService = ChatService<SqliteMessageRepository>;

/// Shared application state used by the HTTP handlers and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub models: Arc<ModelRegistry>,
    pub config: Arc<ConfigStore>,
    pub model_settings: ModelSettings,
}

impl AppState {
    /// Create the data directory, open the database and load configuration.
    ///
    /// The model slot starts empty; call [`AppState::configure_model`] to
    /// validate the stored key.
    pub async fn init(data_dir: PathBuf, model_settings: ModelSettings) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("{}?mode=rwc", database_url(&data_dir));
        let pool = DatabasePool::new(&db_url).await?;
        let config = ConfigStore::load(data_dir.clone()).await;

        tracing::info!(data_dir = %data_dir.display(), "Application state initialized");
        Ok(Self::from_parts(pool, config, model_settings))
    }

    pub fn from_parts(pool: DatabasePool, config: ConfigStore, model_settings: ModelSettings) -> Self {
        let models = Arc::new(ModelRegistry::new());

        let auth_service = AuthService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteSessionRepository::new(pool.clone()),
            Argon2CredentialHasher::new(),
            RandomSessionTokens::new(),
        );
        let chat_service = ChatService::new(SqliteMessageRepository::new(pool), models.clone());

        Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            models,
            config: Arc::new(config),
            model_settings,
        }
    }

    /// Build a client from the current key and run validation.
    pub async fn configure_model(&self) -> ConfigureOutcome {
        match create_provider(&self.config.secrets(), &self.model_settings) {
            Ok(provider) => self.models.configure(provider).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build model client");
                self.models.clear();
                ConfigureOutcome::Disabled
            }
        }
    }
}
