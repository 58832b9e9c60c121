//! Search execution over a [`PlacesClient`].
//!
//! Builds the single free-text query from a directive, runs it, truncates
//! to the configured cap, and converts raw results into typed places with
//! closed categories. No ranking, dedup, or pagination.

use tracing::{debug, instrument};

use waypoint_types::place::{LatLng, Place, PlaceCategory, RawPlaceResult};
use waypoint_types::search::{SearchDirective, SearchError};

use crate::search::places::PlacesClient;

/// Executes search directives against a places backend.
pub struct SearchService<C: PlacesClient> {
    client: C,
    max_results: usize,
}

impl<C: PlacesClient> SearchService<C> {
    /// Create a new search service with a hard result cap.
    pub fn new(client: C, max_results: usize) -> Self {
        Self {
            client,
            max_results,
        }
    }

    /// Build the free-text query for a directive.
    ///
    /// Terms joined by spaces, then the location. Requirements ride on the
    /// directive for display but are not part of the query string.
    pub fn build_query(directive: &SearchDirective) -> String {
        format!("{} {}", directive.search_terms.join(" "), directive.location)
    }

    /// Execute a directive: query, cap, and convert.
    #[instrument(skip_all, fields(client = self.client.name()))]
    pub async fn execute(&self, directive: &SearchDirective) -> Result<Vec<Place>, SearchError> {
        let query = Self::build_query(directive);
        debug!(%query, "Executing place search");

        let raw = self.client.text_search(&query).await?;
        let total = raw.len();

        let places: Vec<Place> = raw
            .into_iter()
            .take(self.max_results)
            .enumerate()
            .map(|(index, result)| convert(index, result))
            .collect();

        debug!(returned = places.len(), total, "Place search complete");
        Ok(places)
    }
}

/// Convert one raw result into a typed place.
///
/// The first raw category label drives the closed-enum mapping; a missing
/// label maps to `Others`. Missing IDs fall back to a positional ID and
/// missing geometry to the origin, matching the upstream contract.
fn convert(index: usize, raw: RawPlaceResult) -> Place {
    let category = raw
        .categories
        .first()
        .map(|label| PlaceCategory::from_raw(label))
        .unwrap_or(PlaceCategory::Others);

    Place {
        id: raw.id.unwrap_or_else(|| format!("place-{index}")),
        name: raw.name,
        position: raw.position.unwrap_or(LatLng { lat: 0.0, lng: 0.0 }),
        category,
        address: raw.address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    struct StubClient {
        results: Mutex<Option<Result<Vec<RawPlaceResult>, SearchError>>>,
        queries: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn returning(results: Vec<RawPlaceResult>) -> Self {
            Self {
                results: Mutex::new(Some(Ok(results))),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: SearchError) -> Self {
            Self {
                results: Mutex::new(Some(Err(error))),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl PlacesClient for StubClient {
        fn name(&self) -> &str {
            "stub"
        }

        async fn text_search(&self, query: &str) -> Result<Vec<RawPlaceResult>, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.results.lock().unwrap().take().expect("stub exhausted")
        }
    }

    fn raw(name: &str, category: &str) -> RawPlaceResult {
        RawPlaceResult {
            id: Some(format!("gp-{name}")),
            name: name.to_string(),
            position: Some(LatLng { lat: 37.55, lng: 126.92 }),
            categories: vec![category.to_string()],
            address: Some("Seoul".to_string()),
        }
    }

    fn directive() -> SearchDirective {
        SearchDirective {
            search_terms: vec!["cafe".to_string(), "coffee".to_string()],
            location: "Hongdae".to_string(),
            requirements: vec!["quiet".to_string()],
            place_type: Some(PlaceCategory::Cafe),
        }
    }

    #[test]
    fn test_query_joins_terms_and_location() {
        assert_eq!(SearchService::<StubClient>::build_query(&directive()), "cafe coffee Hongdae");
    }

    #[test]
    fn test_query_excludes_requirements() {
        let query = SearchService::<StubClient>::build_query(&directive());
        assert!(!query.contains("quiet"));
    }

    #[tokio::test]
    async fn test_execute_caps_results_at_max() {
        let results: Vec<RawPlaceResult> =
            (0..8).map(|i| raw(&format!("cafe-{i}"), "cafe")).collect();
        let service = SearchService::new(StubClient::returning(results), 5);

        let places = service.execute(&directive()).await.unwrap();
        assert_eq!(places.len(), 5);
    }

    #[tokio::test]
    async fn test_execute_maps_categories() {
        let results = vec![
            raw("a", "night_club"),
            raw("b", "bakery"),
            raw("c", "pharmacy"),
        ];
        let service = SearchService::new(StubClient::returning(results), 5);

        let places = service.execute(&directive()).await.unwrap();
        assert_eq!(places[0].category, PlaceCategory::Club);
        assert_eq!(places[1].category, PlaceCategory::Cafe);
        assert_eq!(places[2].category, PlaceCategory::Others);
    }

    #[tokio::test]
    async fn test_execute_fills_missing_id_and_position() {
        let results = vec![RawPlaceResult {
            id: None,
            name: "Nameless".to_string(),
            position: None,
            categories: vec![],
            address: None,
        }];
        let service = SearchService::new(StubClient::returning(results), 5);

        let places = service.execute(&directive()).await.unwrap();
        assert_eq!(places[0].id, "place-0");
        assert_eq!(places[0].position, LatLng { lat: 0.0, lng: 0.0 });
        assert_eq!(places[0].category, PlaceCategory::Others);
    }

    #[tokio::test]
    async fn test_execute_passes_built_query_to_client() {
        let client = StubClient::returning(vec![]);
        let service = SearchService::new(client, 5);

        service.execute(&directive()).await.unwrap();
        let queries = service.client.queries.lock().unwrap();
        assert_eq!(queries.as_slice(), ["cafe coffee Hongdae"]);
    }

    #[tokio::test]
    async fn test_execute_propagates_client_failure() {
        let service = SearchService::new(
            StubClient::failing(SearchError::Provider {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: "quota".to_string(),
            }),
            5,
        );

        let result = service.execute(&directive()).await;
        assert!(matches!(result, Err(SearchError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_execute_empty_results_ok() {
        let service = SearchService::new(StubClient::returning(vec![]), 5);
        let places = service.execute(&directive()).await.unwrap();
        assert!(places.is_empty());
    }
}
