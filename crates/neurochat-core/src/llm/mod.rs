//! Model provider abstractions for Neurochat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `ModelRegistry`: the process-wide "configured model" slot
//! - `classify`: last-resort mapping of unstructured error text to `LlmError`

pub mod box_provider;
pub mod classify;
pub mod provider;
pub mod registry;
