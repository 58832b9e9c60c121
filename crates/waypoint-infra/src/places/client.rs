//! GooglePlacesClient -- concrete [`PlacesClient`] implementation for the
//! Places Text Search API.
//!
//! Sends a single GET per search to `/maps/api/place/textsearch/json`.
//! The API key is wrapped in [`secrecy::SecretString`]; the endpoint takes
//! it as a query parameter, so the full request URL is never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use waypoint_core::search::places::PlacesClient;
use waypoint_types::place::RawPlaceResult;
use waypoint_types::search::SearchError;

use super::types::TextSearchResponse;

/// Statuses the Places API reports for a well-formed search.
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Google Places text-search client.
pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GooglePlacesClient {
    /// Create a new places client.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://maps.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self) -> String {
        format!("{}/maps/api/place/textsearch/json", self.base_url)
    }

    /// Convert a wire response into raw results, checking the service's
    /// own status field.
    fn convert_response(response: TextSearchResponse) -> Result<Vec<RawPlaceResult>, SearchError> {
        match response.status.as_str() {
            STATUS_OK | STATUS_ZERO_RESULTS => {
                Ok(response.results.into_iter().map(Into::into).collect())
            }
            status => Err(SearchError::Provider {
                status: status.to_string(),
                message: response.error_message.unwrap_or_default(),
            }),
        }
    }
}

// GooglePlacesClient intentionally does NOT derive Debug; see GeminiProvider.

impl PlacesClient for GooglePlacesClient {
    fn name(&self) -> &str {
        "google-places"
    }

    async fn text_search(&self, query: &str) -> Result<Vec<RawPlaceResult>, SearchError> {
        let response = self
            .client
            .get(self.url())
            .query(&[("query", query), ("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| SearchError::Request(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::Request(format!("HTTP {status}: {error_body}")));
        }

        let search_resp: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Deserialization(format!("failed to parse response: {e}")))?;

        Self::convert_response(search_resp)
    }
}
