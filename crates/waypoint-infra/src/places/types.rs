//! Places Text Search API wire types.
//!
//! Specific to the Google Places `textsearch` endpoint; converted into the
//! provider-agnostic `RawPlaceResult` before leaving this crate.

use serde::Deserialize;

use waypoint_types::place::{LatLng, RawPlaceResult};

/// Response body for `/maps/api/place/textsearch/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<TextSearchResult>,
    pub error_message: Option<String>,
}

/// One result row from a text search.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSearchResult {
    pub place_id: Option<String>,
    pub name: String,
    pub geometry: Option<Geometry>,
    /// Category labels, most specific first.
    #[serde(default)]
    pub types: Vec<String>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl From<TextSearchResult> for RawPlaceResult {
    fn from(result: TextSearchResult) -> Self {
        RawPlaceResult {
            id: result.place_id,
            name: result.name,
            position: result.geometry.map(|g| LatLng {
                lat: g.location.lat,
                lng: g.location.lng,
            }),
            categories: result.types,
            address: result.formatted_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "place_id": "ChIJx",
                "name": "Cafe Onion",
                "geometry": {"location": {"lat": 37.55, "lng": 126.92}},
                "types": ["cafe", "food", "establishment"],
                "formatted_address": "Seoul, Mapo-gu"
            }]
        }"#;
        let resp: TextSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "OK");
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].types[0], "cafe");
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"status": "REQUEST_DENIED", "error_message": "API key invalid"}"#;
        let resp: TextSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "REQUEST_DENIED");
        assert!(resp.results.is_empty());
        assert_eq!(resp.error_message.as_deref(), Some("API key invalid"));
    }

    #[test]
    fn test_into_raw_place_result() {
        let result = TextSearchResult {
            place_id: Some("ChIJx".to_string()),
            name: "Cafe Onion".to_string(),
            geometry: Some(Geometry {
                location: Location { lat: 37.55, lng: 126.92 },
            }),
            types: vec!["bakery".to_string()],
            formatted_address: Some("Seoul".to_string()),
        };

        let raw: RawPlaceResult = result.into();
        assert_eq!(raw.id.as_deref(), Some("ChIJx"));
        assert_eq!(raw.position.unwrap().lat, 37.55);
        assert_eq!(raw.categories, vec!["bakery".to_string()]);
    }

    #[test]
    fn test_into_raw_place_result_without_geometry() {
        let result = TextSearchResult {
            place_id: None,
            name: "Nameless".to_string(),
            geometry: None,
            types: vec![],
            formatted_address: None,
        };

        let raw: RawPlaceResult = result.into();
        assert!(raw.id.is_none());
        assert!(raw.position.is_none());
    }
}
