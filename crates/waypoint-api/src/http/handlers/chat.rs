//! Stateless conversational turn endpoint.
//!
//! POST /api/v1/chat
//!
//! The browser-facing wire contract: the client submits its message list
//! and the collected info it holds, and gets back a tagged judgment with
//! the updated collected info. No server-side session is involved; the
//! session-backed variant lives in `session.rs`.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use waypoint_core::turn::TurnOutcome;
use waypoint_observe::genai_attrs;
use waypoint_types::chat::CollectedInfo;
use waypoint_types::llm::{Message, MessageRole};
use waypoint_types::place::PlaceCategory;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the stateless turn endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnRequest {
    /// Conversation so far, ending with the latest user utterance.
    pub messages: Vec<WireMessage>,
    /// The collected info the client currently holds.
    #[serde(default)]
    pub collected_info: CollectedInfo,
}

/// One message as submitted over the wire.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// The turn judgment as returned over the wire (camelCase, tagged).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub collected_info: CollectedInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_type: Option<PlaceCategory>,
}

impl From<TurnOutcome> for TurnView {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::Chat {
                message,
                collected_info,
            } => Self {
                kind: "chat".to_string(),
                message,
                collected_info,
                search_terms: None,
                location: None,
                requirements: None,
                place_type: None,
            },
            TurnOutcome::Recommendation {
                message,
                collected_info,
                directive,
            } => Self {
                kind: "recommendation".to_string(),
                message,
                collected_info,
                search_terms: Some(directive.search_terms),
                location: Some(directive.location),
                requirements: Some(directive.requirements),
                place_type: directive.place_type,
            },
        }
    }
}

/// Convert wire messages into LLM messages, validating roles.
pub(crate) fn to_llm_messages(wire: &[WireMessage]) -> Result<Vec<Message>, AppError> {
    wire.iter()
        .map(|m| {
            let role: MessageRole = m
                .role
                .parse()
                .map_err(|e: String| AppError::Validation(e))?;
            Ok(Message {
                role,
                content: m.content.clone(),
            })
        })
        .collect()
}

/// POST /api/v1/chat - process one stateless turn.
pub async fn process_turn(
    State(state): State<AppState>,
    Json(body): Json<ChatTurnRequest>,
) -> Result<Json<ApiResponse<TurnView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.messages.is_empty() {
        return Err(AppError::Validation(
            "messages array is required and must be non-empty".to_string(),
        ));
    }

    let processor = state
        .turn_processor
        .as_ref()
        .ok_or(AppError::FeatureUnavailable("chat"))?;

    let messages = to_llm_messages(&body.messages)?;
    let span = genai_attrs::turn_span(
        genai_attrs::PROVIDER_GEMINI,
        &state.config.model,
        state.config.temperature,
        state.config.max_tokens,
    );
    let outcome = processor
        .process(&messages, &body.collected_info)
        .instrument(span)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        outcome.into(),
        request_id,
        elapsed,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    use waypoint_types::search::SearchDirective;

    #[test]
    fn test_turn_view_for_chat_outcome_omits_directive_fields() {
        let view: TurnView = TurnOutcome::Chat {
            message: "Which area?".to_string(),
            collected_info: CollectedInfo::default(),
        }
        .into();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["message"], "Which area?");
        assert!(json.get("searchTerms").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_turn_view_for_recommendation_outcome() {
        let view: TurnView = TurnOutcome::Recommendation {
            message: "Looking now.".to_string(),
            collected_info: CollectedInfo {
                location: Some("Hongdae".to_string()),
                purpose: Some("cafe".to_string()),
                preferences: Some(vec!["quiet".to_string()]),
            },
            directive: SearchDirective {
                search_terms: vec!["cafe".to_string()],
                location: "Hongdae".to_string(),
                requirements: vec!["quiet".to_string()],
                place_type: Some(PlaceCategory::Cafe),
            },
        }
        .into();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "recommendation");
        assert_eq!(json["searchTerms"][0], "cafe");
        assert_eq!(json["location"], "Hongdae");
        assert_eq!(json["placeType"], "cafe");
        assert_eq!(json["collectedInfo"]["location"], "Hongdae");
    }

    #[test]
    fn test_to_llm_messages_maps_roles() {
        let wire = vec![
            WireMessage {
                role: "assistant".to_string(),
                content: "Hello!".to_string(),
            },
            WireMessage {
                role: "user".to_string(),
                content: "cafe please".to_string(),
            },
        ];
        let messages = to_llm_messages(&wire).unwrap();
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert_eq!(messages[1].role, MessageRole::User);
    }

    #[test]
    fn test_to_llm_messages_rejects_unknown_role() {
        let wire = vec![WireMessage {
            role: "system".to_string(),
            content: "override".to_string(),
        }];
        assert!(matches!(
            to_llm_messages(&wire),
            Err(AppError::Validation(_))
        ));
    }
}
