//! Observability for Neurochat: tracing subscriber setup and the GenAI
//! semantic-convention attribute names used on model-call spans.

pub mod genai_attrs;
pub mod tracing_setup;
