//! The chat turn pipeline.
//!
//! - `prompt`: renders the context window into one linear prompt
//! - `reply`: maps provider outcomes and failures to user-facing replies
//! - `service`: `ChatService`, which runs one user/assistant exchange

pub mod prompt;
pub mod reply;
pub mod service;
