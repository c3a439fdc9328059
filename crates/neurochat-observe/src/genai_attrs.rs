//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Span fields use these names literally (`gen_ai.operation.name`,
//! `gen_ai.provider.name`, `gen_ai.request.model`); the response attribute is
//! recorded after the call through [`GEN_AI_RESPONSE_FINISH_REASONS`].
//! Span naming convention:
//! `"{operation} {model}"` (e.g., `"generate_content gemini-2.5-flash"`).

/// Finish reason reported by the provider for the first candidate.
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Content generation operation.
pub const OP_GENERATE_CONTENT: &str = "generate_content";

/// Gemini provider identifier.
pub const PROVIDER_GEMINI: &str = "gemini";
