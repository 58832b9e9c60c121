//! Session CRUD and the session-backed turn endpoint.
//!
//! Endpoints:
//! - POST   /api/v1/sessions               - Create a session (greeting seeded)
//! - GET    /api/v1/sessions               - List sessions
//! - GET    /api/v1/sessions/{id}          - Get a single session
//! - GET    /api/v1/sessions/{id}/messages - Get the transcript
//! - POST   /api/v1/sessions/{id}/messages - Run one turn
//! - POST   /api/v1/sessions/{id}/clear    - Clear transcript + collected info
//! - DELETE /api/v1/sessions/{id}          - Delete a session

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use waypoint_core::turn::TurnOutcome;
use waypoint_observe::genai_attrs;
use waypoint_types::chat::{ChatMessage, ChatSession};
use waypoint_types::error::RepositoryError;
use waypoint_types::llm::{Message, MessageRole};
use waypoint_types::place::Place;

use crate::http::error::AppError;
use crate::http::handlers::chat::TurnView;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Assistant message appended when a turn fails for any reason.
const TURN_ERROR_MESSAGE: &str = "Sorry, an error occurred while processing your request.";

/// Assistant message appended when the place search fails.
const SEARCH_ERROR_MESSAGE: &str = "Sorry, the place search failed. Please try again.";

/// Request body for the session-backed turn.
#[derive(Debug, Deserialize)]
pub struct SessionTurnRequest {
    /// The user's utterance for this turn.
    pub message: String,
}

/// Response body for the session-backed turn: the judgment plus any places
/// found when the directive was executed.
#[derive(Debug, Serialize)]
pub struct SessionTurnResponse {
    #[serde(flatten)]
    pub turn: TurnView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places: Option<Vec<Place>>,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid
/// format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// POST /api/v1/sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.chat_service.create_session().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(session, request_id, elapsed)))
}

/// GET /api/v1/sessions - List sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ChatSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.chat_service.list_sessions().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(sessions, request_id, elapsed)))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let session = state
        .chat_service
        .get_session(&sid)
        .await?
        .ok_or(AppError::Session(RepositoryError::NotFound))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(session, request_id, elapsed)))
}

/// GET /api/v1/sessions/{id}/messages - Get the ordered transcript.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state
        .chat_service
        .get_session(&sid)
        .await?
        .ok_or(AppError::Session(RepositoryError::NotFound))?;
    let messages = state.chat_service.transcript(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(messages, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/clear - Clear transcript and collected info.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let session = state.chat_service.clear_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(session, request_id, elapsed)))
}

/// DELETE /api/v1/sessions/{id} - Delete a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state.chat_service.delete_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": true}),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/sessions/{id}/messages - Run one turn against a session.
///
/// Appends the user message, processes the turn under the per-session
/// gate, merges collected info, and on a recommendation executes the
/// search and appends a numbered results message. Any failure appends a
/// user-visible assistant error message before surfacing the error; the
/// merged collected info is never rolled back.
pub async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<SessionTurnRequest>,
) -> Result<Json<ApiResponse<SessionTurnResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let session = state
        .chat_service
        .get_session(&sid)
        .await?
        .ok_or(AppError::Session(RepositoryError::NotFound))?;

    let processor = state
        .turn_processor
        .as_ref()
        .ok_or(AppError::FeatureUnavailable("chat"))?;

    // One turn in flight per session; held until this handler returns.
    let _guard = state.chat_service.begin_turn(sid)?;

    state
        .chat_service
        .append_user_message(sid, body.message.clone())
        .await?;

    // The turn contract: latest utterance plus the collected snapshot.
    let messages = vec![Message {
        role: MessageRole::User,
        content: body.message,
    }];
    let span = genai_attrs::turn_span(
        genai_attrs::PROVIDER_GEMINI,
        &state.config.model,
        state.config.temperature,
        state.config.max_tokens,
    );
    let outcome = match processor
        .process(&messages, &session.collected_info)
        .instrument(span)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            state
                .chat_service
                .append_assistant_message(sid, TURN_ERROR_MESSAGE.to_string())
                .await?;
            return Err(e.into());
        }
    };

    state
        .chat_service
        .merge_collected_info(&sid, outcome.collected_info())
        .await?;
    state
        .chat_service
        .append_assistant_message(sid, outcome.message().to_string())
        .await?;

    let mut places: Option<Vec<Place>> = None;
    if let TurnOutcome::Recommendation { directive, .. } = &outcome {
        if let Some(search_service) = state.search_service.as_ref() {
            match search_service.execute(directive).await {
                Ok(found) => {
                    state
                        .chat_service
                        .append_assistant_message(sid, format_results_message(&found))
                        .await?;
                    places = Some(found);
                }
                Err(e) => {
                    state
                        .chat_service
                        .append_assistant_message(sid, SEARCH_ERROR_MESSAGE.to_string())
                        .await?;
                    return Err(e.into());
                }
            }
        } else {
            // Degraded: the directive still goes back to the client.
            tracing::warn!(session_id = %sid, "Search skipped: no places credential");
        }
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        SessionTurnResponse {
            turn: outcome.into(),
            places,
        },
        request_id,
        elapsed,
    )))
}

/// Build the numbered results message appended after a successful search.
fn format_results_message(places: &[Place]) -> String {
    if places.is_empty() {
        return "I couldn't find any matching places. Want to try a different area or type?"
            .to_string();
    }

    let listing = places
        .iter()
        .enumerate()
        .map(|(i, place)| {
            format!(
                "{}. {} ({})",
                i + 1,
                place.name,
                place.address.as_deref().unwrap_or("address unavailable")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Here's what I found:\n\n{listing}\n\nWould you like more details?")
}
