//! GeminiProvider -- concrete [`LlmProvider`] implementation for the
//! Google Generative Language API.
//!
//! Sends non-streaming requests to `models/{model}:generateContent` with
//! the API key in the `x-goog-api-key` header. The key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use waypoint_core::llm::provider::LlmProvider;
use waypoint_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use super::types::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig};

/// Gemini LLM provider.
///
/// Implements [`LlmProvider`] for the Generative Language API. One request
/// per turn; no retry, no backoff, no streaming.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given model.
    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    ///
    /// Gemini names the assistant role "model"; the system prompt travels
    /// as `systemInstruction` rather than as a message.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                };
                GeminiContent::text(Some(role), m.content.clone())
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: request
                .system
                .as_deref()
                .map(|s| GeminiContent::text(None, s)),
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: Some(request.max_tokens),
            }),
        }
    }

    /// Convert a wire response into the generic [`CompletionResponse`].
    fn convert_response(
        model: &str,
        response: GeminiResponse,
    ) -> Result<CompletionResponse, LlmError> {
        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            LlmError::Provider {
                message: "response contained no candidates".to_string(),
            }
        })?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = response
            .usage_metadata
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: model.to_string(),
            usage,
        })
    }
}

// GeminiProvider intentionally does NOT derive Debug: the SecretString
// field keeps the key unprintable, and omitting Debug avoids exposing any
// internal state at all.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_gemini_request(request);
        let url = self.url(&request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::convert_response(&request.model, gemini_resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use waypoint_types::llm::Message;

    fn make_provider() -> GeminiProvider {
        GeminiProvider::new(SecretString::from("test-key-not-real"))
    }

    fn make_request() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-2.0-flash".to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: "quiet cafe in Hongdae".to_string(),
            }],
            system: Some("You are a travel assistant.".to_string()),
            max_tokens: 1024,
            temperature: Some(0.4),
        }
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "gemini");
    }

    #[test]
    fn test_url_construction() {
        let provider = make_provider();
        assert_eq!(
            provider.url("gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            provider.url("gemini-2.0-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_to_gemini_request_maps_roles() {
        let mut request = make_request();
        request.messages.push(Message {
            role: MessageRole::Assistant,
            content: "Which area?".to_string(),
        });

        let gemini_req = GeminiProvider::to_gemini_request(&request);
        assert_eq!(gemini_req.contents[0].role.as_deref(), Some("user"));
        assert_eq!(gemini_req.contents[1].role.as_deref(), Some("model"));
        assert_eq!(
            gemini_req.system_instruction.unwrap().parts[0].text,
            "You are a travel assistant."
        );
        let config = gemini_req.generation_config.unwrap();
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.4));
    }

    #[test]
    fn test_convert_response_joins_parts() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "{\"type\":"}, {"text": "\"chat\"}"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
            }"#,
        )
        .unwrap();

        let completion = GeminiProvider::convert_response("gemini-2.0-flash", resp).unwrap();
        assert_eq!(completion.content, "{\"type\":\"chat\"}");
        assert_eq!(completion.model, "gemini-2.0-flash");
        assert_eq!(completion.usage.input_tokens, 10);
        assert_eq!(completion.usage.output_tokens, 4);
    }

    #[test]
    fn test_convert_response_no_candidates_is_error() {
        let resp: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let result = GeminiProvider::convert_response("gemini-2.0-flash", resp);
        assert!(matches!(result, Err(LlmError::Provider { .. })));
    }

    #[test]
    fn test_convert_response_missing_usage_defaults_to_zero() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}"#,
        )
        .unwrap();
        let completion = GeminiProvider::convert_response("gemini-2.0-flash", resp).unwrap();
        assert_eq!(completion.usage.input_tokens, 0);
        assert_eq!(completion.usage.output_tokens, 0);
    }
}
