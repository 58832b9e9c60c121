//! Raw judgment parsing: JSON unwrapping and field coalescing.
//!
//! The inference service is asked for a bare JSON object but routinely
//! wraps it in markdown code fences, and sometimes returns a scalar where
//! the contract says list. This module absorbs both before validation.

use serde::Deserialize;

use waypoint_types::chat::CollectedInfo;
use waypoint_types::error::TurnError;

/// The upstream judgment, as loosely as we are willing to accept it.
///
/// Everything except `type` is optional here; the processor decides what
/// is required for which tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJudgment {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: Option<String>,
    pub collected_info: Option<CollectedInfo>,
    /// Required fields the upstream still considers unknown.
    #[serde(default)]
    pub missing_info: Vec<String>,
    pub search_terms: Option<OneOrMany>,
    pub location: Option<String>,
    pub requirements: Option<OneOrMany>,
    pub place_type: Option<String>,
}

/// Accepts either a scalar string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Coalesce into a list; a scalar becomes a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Strip markdown code fences from a completion, if present.
///
/// Mirrors the upstream contract: the model is told to return bare JSON
/// but may wrap it in ```json ... ``` anyway.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a completion into a [`RawJudgment`].
///
/// Unparseable output is a malformed judgment: surfaced as a generic
/// processing error, never retried.
pub fn parse_judgment(completion: &str) -> Result<RawJudgment, TurnError> {
    let cleaned = strip_code_fences(completion);
    serde_json::from_str(&cleaned)
        .map_err(|e| TurnError::MalformedJudgment(format!("invalid JSON: {e}")))
}
