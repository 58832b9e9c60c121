//! LlmProvider trait definition.
//!
//! This is the abstraction the turn processor talks to. Uses native async
//! fn in traits (RPITIT, Rust 2024 edition). Implementations live in
//! waypoint-infra (e.g., `GeminiProvider`).

use waypoint_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for generative-text provider backends.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// One shot: no retry, no backoff. A failure ends the turn.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
