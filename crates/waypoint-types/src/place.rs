//! Place and category types for Waypoint.
//!
//! `PlaceCategory` is the closed six-value enum that every free-text
//! category label from the places service is mapped onto. The mapping is
//! keyword-based, checked in a fixed order, first match wins, and is total:
//! any input string yields exactly one category.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Closed category enum for map marker rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Cafe,
    Food,
    Drink,
    Club,
    Landmark,
    Others,
}

impl PlaceCategory {
    /// All category values, in mapping-priority order.
    pub const ALL: [PlaceCategory; 6] = [
        PlaceCategory::Cafe,
        PlaceCategory::Food,
        PlaceCategory::Drink,
        PlaceCategory::Club,
        PlaceCategory::Landmark,
        PlaceCategory::Others,
    ];

    /// Map a free-text category label onto the closed enum.
    ///
    /// The keyword table is checked in order; the first group containing a
    /// matching substring wins. Unrecognized labels map to `Others`, so the
    /// mapping is total. The `club` group is checked after `drink` but
    /// `night_club` still lands on `Club` because the bar/pub keywords do
    /// not occur in it.
    pub fn from_raw(raw: &str) -> Self {
        let label = raw.to_lowercase();

        if ["cafe", "bakery", "coffee"].iter().any(|k| label.contains(k)) {
            return PlaceCategory::Cafe;
        }
        if ["restaurant", "food", "meal"].iter().any(|k| label.contains(k)) {
            return PlaceCategory::Food;
        }
        if ["bar", "liquor", "pub"].iter().any(|k| label.contains(k)) {
            return PlaceCategory::Drink;
        }
        if ["night_club", "club"].iter().any(|k| label.contains(k)) {
            return PlaceCategory::Club;
        }
        if ["tourist", "attraction", "museum", "art_gallery", "park", "amusement_park"]
            .iter()
            .any(|k| label.contains(k))
        {
            return PlaceCategory::Landmark;
        }

        PlaceCategory::Others
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceCategory::Cafe => write!(f, "cafe"),
            PlaceCategory::Food => write!(f, "food"),
            PlaceCategory::Drink => write!(f, "drink"),
            PlaceCategory::Club => write!(f, "club"),
            PlaceCategory::Landmark => write!(f, "landmark"),
            PlaceCategory::Others => write!(f, "others"),
        }
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cafe" => Ok(PlaceCategory::Cafe),
            "food" => Ok(PlaceCategory::Food),
            "drink" => Ok(PlaceCategory::Drink),
            "club" => Ok(PlaceCategory::Club),
            "landmark" => Ok(PlaceCategory::Landmark),
            "others" => Ok(PlaceCategory::Others),
            other => Err(format!("invalid place category: '{other}'")),
        }
    }
}

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A place rendered as a map marker.
///
/// Built from raw search results; never persisted beyond the current
/// response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub position: LatLng,
    pub category: PlaceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A raw result from the places text-search service, before category
/// mapping and truncation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlaceResult {
    pub id: Option<String>,
    pub name: String,
    pub position: Option<LatLng>,
    /// Free-text category labels as returned by the service, most
    /// specific first.
    pub categories: Vec<String>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in PlaceCategory::ALL {
            let s = category.to_string();
            let parsed: PlaceCategory = s.parse().unwrap();
            assert_eq!(category, parsed);
        }
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&PlaceCategory::Landmark).unwrap();
        assert_eq!(json, "\"landmark\"");
        let parsed: PlaceCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PlaceCategory::Landmark);
    }

    #[test]
    fn test_from_raw_cafe_group() {
        assert_eq!(PlaceCategory::from_raw("cafe"), PlaceCategory::Cafe);
        assert_eq!(PlaceCategory::from_raw("bakery"), PlaceCategory::Cafe);
        assert_eq!(PlaceCategory::from_raw("coffee_shop"), PlaceCategory::Cafe);
    }

    #[test]
    fn test_from_raw_food_group() {
        assert_eq!(PlaceCategory::from_raw("restaurant"), PlaceCategory::Food);
        assert_eq!(PlaceCategory::from_raw("meal_takeaway"), PlaceCategory::Food);
    }

    #[test]
    fn test_from_raw_drink_group() {
        assert_eq!(PlaceCategory::from_raw("bar"), PlaceCategory::Drink);
        assert_eq!(PlaceCategory::from_raw("liquor_store"), PlaceCategory::Drink);
        assert_eq!(PlaceCategory::from_raw("pub"), PlaceCategory::Drink);
    }

    #[test]
    fn test_from_raw_club() {
        assert_eq!(PlaceCategory::from_raw("night_club"), PlaceCategory::Club);
    }

    #[test]
    fn test_from_raw_landmark_group() {
        assert_eq!(
            PlaceCategory::from_raw("tourist_attraction"),
            PlaceCategory::Landmark
        );
        assert_eq!(PlaceCategory::from_raw("museum"), PlaceCategory::Landmark);
        assert_eq!(
            PlaceCategory::from_raw("amusement_park"),
            PlaceCategory::Landmark
        );
    }

    #[test]
    fn test_from_raw_unrecognized_defaults_to_others() {
        assert_eq!(PlaceCategory::from_raw("pharmacy"), PlaceCategory::Others);
        assert_eq!(PlaceCategory::from_raw(""), PlaceCategory::Others);
        assert_eq!(PlaceCategory::from_raw("unknown"), PlaceCategory::Others);
    }

    #[test]
    fn test_from_raw_case_insensitive() {
        assert_eq!(PlaceCategory::from_raw("BAKERY"), PlaceCategory::Cafe);
        assert_eq!(PlaceCategory::from_raw("Night_Club"), PlaceCategory::Club);
    }

    #[test]
    fn test_from_raw_deterministic() {
        // Same input, same output, for a spread of labels.
        for label in ["cafe", "night_club", "pharmacy", "bar", "museum", "food_court"] {
            assert_eq!(PlaceCategory::from_raw(label), PlaceCategory::from_raw(label));
        }
    }

    #[test]
    fn test_place_serialize_skips_missing_address() {
        let place = Place {
            id: "place-0".to_string(),
            name: "Cafe Onion".to_string(),
            position: LatLng { lat: 37.55, lng: 126.92 },
            category: PlaceCategory::Cafe,
            address: None,
        };
        let json = serde_json::to_value(&place).unwrap();
        assert!(json.get("address").is_none());
        assert_eq!(json["category"], "cafe");
    }
}
