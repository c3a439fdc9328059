//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (neurochat-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod message;
pub mod session;
pub mod user;
