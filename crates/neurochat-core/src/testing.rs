//! In-memory test doubles for the core ports.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use neurochat_types::chat::{ChatMessage, MessageRole};
use neurochat_types::error::{AuthError, RepositoryError};
use neurochat_types::llm::{GenerationOutcome, LlmError};
use neurochat_types::user::{User, UserCredentials, UserId};

use crate::auth::hasher::CredentialHasher;
use crate::auth::token::SessionTokens;
use crate::llm::provider::LlmProvider;
use crate::repository::message::MessageRepository;
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;

#[derive(Default)]
struct StoreState {
    users: Vec<UserCredentials>,
    sessions: HashMap<String, UserId>,
    messages: Vec<ChatMessage>,
    next_seq: i64,
}

/// Shared in-memory store implementing every repository trait.
///
/// Clones share state, so one store can back several services in a test.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn message_count(&self, user_id: &UserId) -> usize {
        self.state
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| &m.user_id == user_id)
            .count()
    }

    /// Delete a user and cascade to its sessions and messages.
    pub fn remove_user(&self, id: &UserId) {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|c| &c.user.id != id);
        state.sessions.retain(|_, owner| owner != id);
        state.messages.retain(|m| &m.user_id != id);
    }
}

impl UserRepository for InMemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|c| c.user.username == username) {
            return Err(RepositoryError::Conflict(format!("username '{username}'")));
        }
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        state.users.push(UserCredentials {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserCredentials>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|c| c.user.username == username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|c| &c.user.id == id)
            .map(|c| c.user.clone()))
    }
}

impl SessionRepository for InMemoryStore {
    async fn create_session(&self, token_hash: &str, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.sessions.insert(token_hash.to_string(), *user_id);
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<UserId>, RepositoryError> {
        Ok(self.state.lock().unwrap().sessions.get(token_hash).copied())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<(), RepositoryError> {
        self.state.lock().unwrap().sessions.remove(token_hash);
        Ok(())
    }
}

impl MessageRepository for InMemoryStore {
    async fn append_message(
        &self,
        user_id: &UserId,
        role: MessageRole,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.next_seq += 1;
        let message = ChatMessage {
            seq: state.next_seq,
            user_id: *user_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn recent_messages(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, RepositoryError> {
        let all = self.all_messages(user_id).await?;
        let skip = all.len().saturating_sub(limit as usize);
        Ok(all.into_iter().skip(skip).collect())
    }

    async fn all_messages(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn clear_messages(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.messages.len();
        state.messages.retain(|m| &m.user_id != user_id);
        Ok((before - state.messages.len()) as u64)
    }
}

/// Reversible "hash" so tests stay fast.
pub struct FakeHasher;

impl CredentialHasher for FakeHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

/// Sequential alphanumeric tokens.
#[derive(Default)]
pub struct FakeTokens {
    counter: Mutex<u64>,
}

impl SessionTokens for FakeTokens {
    fn generate(&self) -> String {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("token{:04}", *counter)
    }

    fn hash(&self, token: &str) -> String {
        format!("h{token}")
    }
}

/// Provider that replays a fixed script of outcomes and records prompts.
///
/// Once the script is exhausted every call returns `Ok(Empty)`.
#[derive(Clone)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<Result<GenerationOutcome, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<GenerationOutcome, LlmError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(GenerationOutcome::Empty))
    }
}
