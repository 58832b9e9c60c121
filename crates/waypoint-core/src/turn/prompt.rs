//! Turn instruction prompt builder.
//!
//! Assembles the fixed instruction template sent with every turn: the
//! slot-filling contract, the JSON response shape, worked examples, and
//! the current collected-info snapshot, using XML tag boundaries for clear
//! section delineation.

use waypoint_types::chat::CollectedInfo;

/// Builds the per-turn system prompt.
///
/// Layout:
/// ```text
/// <role>travel recommendation assistant ...</role>
/// <format>respond with a single JSON object ...</format>
/// <examples>three worked input/output pairs</examples>
/// <collected_info>{current snapshot}</collected_info>
/// ```
pub struct TurnPromptBuilder;

impl TurnPromptBuilder {
    /// Build the complete instruction prompt for one turn.
    pub fn build(collected: &CollectedInfo) -> String {
        let snapshot = serde_json::to_string(collected)
            .unwrap_or_else(|_| r#"{"location":null,"purpose":null,"preferences":null}"#.into());

        let mut sections = Vec::with_capacity(4);

        sections.push(
            "<role>\n\
            You are a travel recommendation assistant. Hold a natural conversation \
            while collecting three pieces of information: the area the user wants \
            to visit (location), what kind of place they are after (purpose), and \
            any special requirements (preferences). Ask for what is still missing; \
            once everything is known, produce a place-search directive.\n\
            </role>"
                .to_string(),
        );

        sections.push(
            "<format>\n\
            Respond with a single JSON object and nothing else. Shape:\n\
            {\n\
              \"type\": \"chat\" | \"recommendation\",\n\
              \"message\": \"text shown to the user\",\n\
              \"collectedInfo\": {\"location\": ..., \"purpose\": ..., \"preferences\": [...]},\n\
              \"missingInfo\": [\"location\"],\n\
              \"searchTerms\": [\"cafe\"],\n\
              \"location\": \"Hongdae\",\n\
              \"requirements\": [\"quiet\"],\n\
              \"placeType\": \"cafe\"\n\
            }\n\
            Use \"chat\" with a clarifying message while information is missing, \
            listing the unknown fields in missingInfo. Use \"recommendation\" with \
            searchTerms, location, requirements, and placeType only when nothing \
            is missing. Always return the full updated collectedInfo.\n\
            </format>"
                .to_string(),
        );

        sections.push(
            "<examples>\n\
            Input: \"Recommend a quiet cafe near Hongdae\"\n\
            Output: {\"type\": \"recommendation\", \"searchTerms\": [\"cafe\"], \
            \"location\": \"Hongdae\", \"requirements\": [\"quiet\"], \
            \"placeType\": \"cafe\", \"collectedInfo\": {\"location\": \"Hongdae\", \
            \"purpose\": \"cafe\", \"preferences\": [\"quiet\"]}, \"missingInfo\": [], \
            \"message\": \"Looking for quiet cafes near Hongdae.\"}\n\
            \n\
            Input: \"Hello\"\n\
            Output: {\"type\": \"chat\", \"message\": \"Hello! What kind of place \
            are you looking for?\", \"collectedInfo\": {\"location\": null, \
            \"purpose\": null, \"preferences\": null}, \"missingInfo\": \
            [\"location\", \"purpose\", \"preferences\"]}\n\
            \n\
            Input: \"Find a 24-hour restaurant at Gangnam station\"\n\
            Output: {\"type\": \"recommendation\", \"searchTerms\": [\"restaurant\"], \
            \"location\": \"Gangnam station\", \"requirements\": [\"open 24 hours\"], \
            \"placeType\": \"food\", \"collectedInfo\": {\"location\": \"Gangnam station\", \
            \"purpose\": \"restaurant\", \"preferences\": [\"open 24 hours\"]}, \
            \"missingInfo\": [], \"message\": \"Looking for 24-hour restaurants near \
            Gangnam station.\"}\n\
            </examples>"
                .to_string(),
        );

        sections.push(format!(
            "<collected_info>\n\
            Information collected so far: {snapshot}\n\
            Merge what the user just said into it; never discard a known value.\n\
            </collected_info>"
        ));

        sections.join("\n\n")
    }
}
