//! Substring-based error classification.
//!
//! Providers should map structured error codes (HTTP status, error status
//! enums) to [`LlmError`] directly. This module is the documented last
//! resort for errors that only carry free-form text.

use neurochat_types::llm::LlmError;

const INVALID_KEY_MARKERS: &[&str] = &[
    "api_key_invalid",
    "api key not valid",
    "invalid api key",
    "permission denied",
    "permission_denied",
];

const QUOTA_MARKERS: &[&str] = &["quota", "resource_exhausted", "limit"];

/// Classify an unstructured provider error message.
///
/// Invalid-key markers win over quota markers, so a message mentioning both
/// is reported as a credentials problem.
pub fn classify_message(message: &str) -> LlmError {
    let lowered = message.to_lowercase();

    if INVALID_KEY_MARKERS.iter().any(|m| lowered.contains(m)) {
        LlmError::InvalidKey(message.to_string())
    } else if QUOTA_MARKERS.iter().any(|m| lowered.contains(m)) {
        LlmError::QuotaExceeded(message.to_string())
    } else {
        LlmError::Provider {
            message: message.to_string(),
        }
    }
}
