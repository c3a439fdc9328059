//! GeminiProvider -- concrete [`LlmProvider`] for the Gemini REST API.
//!
//! The API key is wrapped in [`SecretString`] and only exposed when setting
//! the `x-goog-api-key` header. Errors are classified from the HTTP status
//! and the structured error body first; free-form message matching is the
//! fallback.

use std::time::Duration;

use neurochat_core::llm::classify::classify_message;
use neurochat_core::llm::provider::LlmProvider;
use neurochat_observe::genai_attrs;
use neurochat_types::llm::{GenerationOutcome, LlmError};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use super::types::{
    BLOCKING_FINISH_REASONS, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini LLM provider.
///
/// Does not derive `Debug`, so the client and key never end up in logs.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider with the given request timeout.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (proxies, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, prompt: &str) -> Result<GenerationOutcome, LlmError> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::Unexpected(format!("failed to parse response: {e}"))
            }
        })?;

        let finish_reason = body.finish_reason().unwrap_or("");
        tracing::Span::current().record(genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS, finish_reason);

        Ok(outcome_from_response(&body))
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        genai_attrs::PROVIDER_GEMINI
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationOutcome, LlmError> {
        let span = tracing::info_span!(
            "generate_content",
            otel.name = %format!("{} {}", genai_attrs::OP_GENERATE_CONTENT, self.model),
            gen_ai.operation.name = genai_attrs::OP_GENERATE_CONTENT,
            gen_ai.provider.name = genai_attrs::PROVIDER_GEMINI,
            gen_ai.request.model = %self.model,
            gen_ai.response.finish_reasons = tracing::field::Empty,
        );

        let result = self.send(prompt).instrument(span).await;
        match &result {
            Ok(outcome) => tracing::debug!(outcome = outcome_label(outcome), "Gemini call finished"),
            Err(e) => tracing::warn!(error = %e, "Gemini call failed"),
        }
        result
    }
}

fn outcome_label(outcome: &GenerationOutcome) -> &'static str {
    match outcome {
        GenerationOutcome::Text(_) => "text",
        GenerationOutcome::Blocked => "blocked",
        GenerationOutcome::Empty => "empty",
    }
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        }
    }
}

/// Reduce a successful response to an outcome tag.
pub fn outcome_from_response(body: &GenerateContentResponse) -> GenerationOutcome {
    let prompt_blocked = body
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
        .is_some_and(|reason| !reason.is_empty());

    let candidate_blocked = body
        .finish_reason()
        .is_some_and(|reason| BLOCKING_FINISH_REASONS.contains(&reason));

    if prompt_blocked || candidate_blocked {
        return GenerationOutcome::Blocked;
    }

    let text = body.text();
    if text.trim().is_empty() {
        GenerationOutcome::Empty
    } else {
        GenerationOutcome::Text(text)
    }
}

/// Classify a non-2xx response.
pub fn error_from_response(status: StatusCode, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let message = match &parsed {
        Some(err) => {
            let reasons: Vec<&str> = err
                .details
                .iter()
                .filter_map(|d| d.reason.as_deref())
                .collect();
            let status_name = err.status.as_deref().unwrap_or("UNKNOWN");
            if reasons.is_empty() {
                format!("{status_name}: {}", err.message)
            } else {
                format!("{status_name}: {} ({})", err.message, reasons.join(", "))
            }
        }
        None => format!("HTTP {status}: {body}"),
    };

    match status.as_u16() {
        401 | 403 => return LlmError::InvalidKey(message),
        429 => return LlmError::QuotaExceeded(message),
        _ => {}
    }

    match parsed.as_ref().and_then(|e| e.status.as_deref()) {
        Some("PERMISSION_DENIED" | "UNAUTHENTICATED") => LlmError::InvalidKey(message),
        Some("RESOURCE_EXHAUSTED") => LlmError::QuotaExceeded(message),
        _ => classify_message(&message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_outcome() {
        let body = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "hi there"}]}, "finishReason": "STOP"}]}"#,
        );
        assert_eq!(outcome_from_response(&body), GenerationOutcome::Text("hi there".into()));
    }

    #[test]
    fn test_prompt_block_is_blocked() {
        let body = response(r#"{"promptFeedback": {"blockReason": "OTHER"}}"#);
        assert_eq!(outcome_from_response(&body), GenerationOutcome::Blocked);
    }

    #[test]
    fn test_safety_finish_is_blocked() {
        let body = response(
            r#"{"candidates": [{"content": {"parts": [{"text": "partial"}]}, "finishReason": "SAFETY"}]}"#,
        );
        assert_eq!(outcome_from_response(&body), GenerationOutcome::Blocked);
    }

    #[test]
    fn test_blank_text_is_empty() {
        let body = response(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "MAX_TOKENS"}]}"#);
        assert_eq!(outcome_from_response(&body), GenerationOutcome::Empty);
        assert_eq!(outcome_from_response(&response("{}")), GenerationOutcome::Empty);
    }

    #[test]
    fn test_invalid_key_from_error_body() {
        // Gemini reports a bad key as 400 INVALID_ARGUMENT.
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}}"#;
        let err = error_from_response(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, LlmError::InvalidKey(_)));
    }

    #[test]
    fn test_status_codes_map_directly() {
        assert!(matches!(
            error_from_response(StatusCode::FORBIDDEN, "nope"),
            LlmError::InvalidKey(_)
        ));
        assert!(matches!(
            error_from_response(StatusCode::TOO_MANY_REQUESTS, ""),
            LlmError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn test_structured_status_maps_directly() {
        let body = r#"{"error": {"code": 400, "message": "denied", "status": "PERMISSION_DENIED"}}"#;
        assert!(matches!(
            error_from_response(StatusCode::BAD_REQUEST, body),
            LlmError::InvalidKey(_)
        ));
        let body = r#"{"error": {"code": 400, "message": "slow down", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            error_from_response(StatusCode::BAD_REQUEST, body),
            LlmError::QuotaExceeded(_)
        ));
    }

    #[test]
    fn test_unclassified_error_is_generic() {
        let body = r#"{"error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}}"#;
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(
            err,
            LlmError::Provider {
                message: "INTERNAL: Internal error encountered.".into()
            }
        );
    }

    #[test]
    fn test_url_and_debug_safety() {
        let provider = GeminiProvider::new(
            SecretString::from("AIza-secret"),
            DEFAULT_MODEL.to_string(),
            DEFAULT_TIMEOUT,
        )
        .unwrap()
        .with_base_url("http://localhost:9999/");
        assert_eq!(
            provider.url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(LlmProvider::name(&provider), "gemini");
    }
}
