//! PlacesClient trait definition.
//!
//! The port to the external places text-search service. Implementations
//! live in waypoint-infra (e.g., `GooglePlacesClient`). Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use waypoint_types::place::RawPlaceResult;
use waypoint_types::search::SearchError;

/// Trait for places text-search backends.
pub trait PlacesClient: Send + Sync {
    /// Human-readable client name (e.g., "google-places").
    fn name(&self) -> &str;

    /// Execute a free-text search and return raw results in service order.
    ///
    /// One shot: no retry, no backoff, no pagination.
    fn text_search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RawPlaceResult>, SearchError>> + Send;
}
