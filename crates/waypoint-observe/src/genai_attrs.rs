//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! These follow the OTel GenAI Semantic Conventions specification for
//! consistent LLM call instrumentation across the codebase, plus a helper
//! that opens the standard span for one turn judgment.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"process_turn gemini-2.0-flash"`)

/// The name of the operation being performed (e.g., "process_turn").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "gemini").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested (e.g., "gemini-2.0-flash").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

// --- Operation name values ---

/// One conversational slot-filling turn judgment.
pub const OP_PROCESS_TURN: &str = "process_turn";

// --- Provider name values ---

/// Gemini provider identifier.
pub const PROVIDER_GEMINI: &str = "gemini";

/// Open the standard GenAI span for one turn judgment.
///
/// Fields are declared empty and recorded through the semconv constants so
/// the attribute names stay in one place.
pub fn turn_span(provider: &str, model: &str, temperature: f64, max_tokens: u32) -> tracing::Span {
    let span = tracing::info_span!(
        "process_turn",
        gen_ai.operation.name = tracing::field::Empty,
        gen_ai.provider.name = tracing::field::Empty,
        gen_ai.request.model = tracing::field::Empty,
        gen_ai.request.temperature = tracing::field::Empty,
        gen_ai.request.max_tokens = tracing::field::Empty,
    );
    span.record(GEN_AI_OPERATION_NAME, OP_PROCESS_TURN);
    span.record(GEN_AI_PROVIDER_NAME, provider);
    span.record(GEN_AI_REQUEST_MODEL, model);
    span.record(GEN_AI_REQUEST_TEMPERATURE, temperature);
    span.record(GEN_AI_REQUEST_MAX_TOKENS, max_tokens);
    span
}
