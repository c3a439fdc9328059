//! Infrastructure layer for Neurochat.
//!
//! Contains implementations of the port traits defined in `neurochat-core`:
//! SQLite storage, Argon2 password hashing, session token generation, the
//! Gemini model client, and the JSON configuration documents in the data
//! directory.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod sqlite;
