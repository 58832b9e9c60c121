//! Conversational turn processing.
//!
//! One turn: the latest user utterance plus the current collected-info
//! snapshot go to the inference service; the structured judgment that comes
//! back is validated, merged, and converted into a tagged outcome.

pub mod judgment;
pub mod processor;
pub mod prompt;

use waypoint_types::chat::CollectedInfo;
use waypoint_types::search::SearchDirective;

/// Result of processing one conversational turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// A clarifying conversational reply; no search is performed.
    Chat {
        message: String,
        collected_info: CollectedInfo,
    },
    /// Enough information exists: a search directive is ready to execute.
    Recommendation {
        message: String,
        collected_info: CollectedInfo,
        directive: SearchDirective,
    },
}

impl TurnOutcome {
    /// The user-facing message of either variant.
    pub fn message(&self) -> &str {
        match self {
            TurnOutcome::Chat { message, .. } => message,
            TurnOutcome::Recommendation { message, .. } => message,
        }
    }

    /// The merged collected info of either variant.
    pub fn collected_info(&self) -> &CollectedInfo {
        match self {
            TurnOutcome::Chat { collected_info, .. } => collected_info,
            TurnOutcome::Recommendation { collected_info, .. } => collected_info,
        }
    }
}
