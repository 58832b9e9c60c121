//! Turn processor: one utterance + collected snapshot in, tagged outcome out.
//!
//! The processor owns the contract with the inference service: it builds
//! the instruction prompt, runs the completion, parses and validates the
//! judgment, merges collected info, and applies the downgrade override when
//! the upstream tags `recommendation` while still reporting missing fields.

use tracing::{debug, instrument, warn};

use waypoint_types::chat::CollectedInfo;
use waypoint_types::config::GlobalConfig;
use waypoint_types::error::TurnError;
use waypoint_types::llm::{CompletionRequest, Message};
use waypoint_types::place::PlaceCategory;
use waypoint_types::search::SearchDirective;

use crate::llm::provider::LlmProvider;
use crate::turn::judgment::{self, RawJudgment};
use crate::turn::prompt::TurnPromptBuilder;
use crate::turn::TurnOutcome;

/// Fallback user-facing message for a recommendation judgment that carries
/// none.
const DEFAULT_RECOMMENDATION_MESSAGE: &str = "Let me look for matching places.";

/// Fallback clarifying message for a chat judgment that carries none.
const DEFAULT_CLARIFYING_MESSAGE: &str =
    "Could you tell me a bit more about what you're looking for?";

/// Processes conversational turns against an [`LlmProvider`].
pub struct TurnProcessor<P: LlmProvider> {
    provider: P,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl<P: LlmProvider> TurnProcessor<P> {
    /// Create a new turn processor over the given provider.
    pub fn new(provider: P, config: &GlobalConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Process one turn.
    ///
    /// `messages` is the conversation as submitted, ending with the latest
    /// user utterance; `collected` is the current snapshot. On success the
    /// returned outcome carries the merged collected info, whichever way
    /// the turn went.
    #[instrument(skip_all, fields(provider = self.provider.name(), model = %self.model))]
    pub async fn process(
        &self,
        messages: &[Message],
        collected: &CollectedInfo,
    ) -> Result<TurnOutcome, TurnError> {
        if messages.is_empty() {
            return Err(TurnError::MalformedJudgment(
                "no messages submitted".to_string(),
            ));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            system: Some(TurnPromptBuilder::build(collected)),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        };

        let response = self.provider.complete(&request).await?;
        let judgment = judgment::parse_judgment(&response.content)?;

        // Merge before branching so even a clarifying turn accumulates
        // whatever slots the upstream extracted.
        let mut merged = collected.clone();
        if let Some(update) = &judgment.collected_info {
            merged.merge_from(update);
        }

        match judgment.kind.as_str() {
            "chat" => Ok(TurnOutcome::Chat {
                message: judgment
                    .message
                    .unwrap_or_else(|| DEFAULT_CLARIFYING_MESSAGE.to_string()),
                collected_info: merged,
            }),
            "recommendation" => self.build_recommendation(judgment, merged),
            other => Err(TurnError::MalformedJudgment(format!(
                "unexpected judgment type '{other}'"
            ))),
        }
    }

    /// Validate a `recommendation` judgment into an outcome.
    ///
    /// The upstream classifier is not contractually guaranteed to gate on
    /// completeness itself: a recommendation still reporting missing fields
    /// is downgraded to a clarifying chat turn and never reaches search.
    fn build_recommendation(
        &self,
        judgment: RawJudgment,
        collected_info: CollectedInfo,
    ) -> Result<TurnOutcome, TurnError> {
        if !judgment.missing_info.is_empty() {
            debug!(
                missing = ?judgment.missing_info,
                "Recommendation with missing fields downgraded to chat"
            );
            return Ok(TurnOutcome::Chat {
                message: judgment
                    .message
                    .unwrap_or_else(|| DEFAULT_CLARIFYING_MESSAGE.to_string()),
                collected_info,
            });
        }

        let search_terms = judgment
            .search_terms
            .map(OneOrManyExt::into_nonempty_vec)
            .unwrap_or_default();
        if search_terms.is_empty() {
            return Err(TurnError::MalformedJudgment(
                "recommendation without searchTerms".to_string(),
            ));
        }

        let location = match judgment.location {
            Some(loc) if !loc.trim().is_empty() => loc,
            _ => {
                return Err(TurnError::MalformedJudgment(
                    "recommendation without location".to_string(),
                ));
            }
        };

        let requirements = judgment
            .requirements
            .map(|r| r.into_vec())
            .unwrap_or_default();

        let place_type = judgment.place_type.as_deref().map(PlaceCategory::from_raw);
        if let (Some(raw), Some(mapped)) = (judgment.place_type.as_deref(), place_type) {
            if mapped == PlaceCategory::Others && raw != "others" {
                warn!(raw, "Unrecognized placeType label mapped to others");
            }
        }

        Ok(TurnOutcome::Recommendation {
            message: judgment
                .message
                .unwrap_or_else(|| DEFAULT_RECOMMENDATION_MESSAGE.to_string()),
            collected_info,
            directive: SearchDirective {
                search_terms,
                location,
                requirements,
                place_type,
            },
        })
    }
}

/// Drops empty strings while coalescing, so `"searchTerms": ""` does not
/// count as a usable term.
trait OneOrManyExt {
    fn into_nonempty_vec(self) -> Vec<String>;
}

impl OneOrManyExt for judgment::OneOrMany {
    fn into_nonempty_vec(self) -> Vec<String> {
        self.into_vec()
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}
