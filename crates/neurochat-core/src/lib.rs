//! Business logic and port trait definitions for Neurochat.
//!
//! This crate defines the "ports" (repository, hasher, token and model
//! provider traits) that the infrastructure layer implements, and the
//! services built on top of them: session identity and the chat turn
//! pipeline. It depends only on `neurochat-types` -- never on
//! `neurochat-infra` or any database/IO crate.

pub mod auth;
pub mod chat;
pub mod llm;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;
