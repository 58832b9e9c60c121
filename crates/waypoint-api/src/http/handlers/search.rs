//! Standalone search execution endpoint.
//!
//! POST /api/v1/search
//!
//! Executes a completed search directive without touching any session:
//! builds the free-text query, runs it, and returns at most the configured
//! number of typed places.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use waypoint_types::place::{Place, PlaceCategory};
use waypoint_types::search::SearchDirective;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the search endpoint (camelCase, mirroring the turn
/// judgment's directive fields).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_terms: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub place_type: Option<PlaceCategory>,
}

/// POST /api/v1/search - execute a search directive.
pub async fn execute_search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<ApiResponse<Vec<Place>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.search_terms.iter().all(|t| t.trim().is_empty()) {
        return Err(AppError::Validation(
            "searchTerms is required and must be non-empty".to_string(),
        ));
    }
    if body.location.trim().is_empty() {
        return Err(AppError::Validation("location is required".to_string()));
    }

    let search_service = state
        .search_service
        .as_ref()
        .ok_or(AppError::FeatureUnavailable("search"))?;

    let directive = SearchDirective {
        search_terms: body.search_terms,
        location: body.location,
        requirements: body.requirements,
        place_type: body.place_type,
    };
    let places = search_service.execute(&directive).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(places, request_id, elapsed)))
}
