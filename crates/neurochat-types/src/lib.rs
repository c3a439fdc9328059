//! Shared domain types for Neurochat.
//!
//! This crate contains the core domain types used across the Neurochat service:
//! User, ChatMessage, the model outcome tags, configuration documents and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod user;
