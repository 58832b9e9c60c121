//! Search directive and search error types for Waypoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::place::PlaceCategory;

/// A completed search directive produced by the turn processor.
///
/// Only ever constructed from a `recommendation` judgment whose required
/// fields are present and whose missing-info list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDirective {
    /// Category terms to search for (e.g., "cafe", "restaurant").
    pub search_terms: Vec<String>,
    /// Area to search in, as free text (e.g., "Hongdae").
    pub location: String,
    /// Special requirements from the user (e.g., "quiet", "open 24 hours").
    /// Carried for display; not part of the query string.
    pub requirements: Vec<String>,
    /// Category hint reported by the upstream judgment, already mapped
    /// onto the closed enum.
    pub place_type: Option<PlaceCategory>,
}

/// Errors from search execution.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("places service unavailable: no API credential configured")]
    Unavailable,

    #[error("places request failed: {0}")]
    Request(String),

    #[error("places service error: {status}: {message}")]
    Provider { status: String, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
